// src/client/page.rs
//! In-memory model of the analysis page: the form and the elements results are written to

use scraper::{ElementRef, Html, Selector};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

use super::error::BindError;
use crate::types::{FieldValue, FormSnapshot};

/// Element whose text content is overwritten on each response.
pub trait TextTarget: Send + Sync {
    fn set_text(&self, text: &str);
}

/// List element whose items are replaced on each response.
pub trait ListTarget: Send + Sync {
    fn clear(&self);
    fn append_item(&self, text: &str);
}

/// Resolves page elements by id.
pub trait ElementLookup {
    fn form(&self, id: &str) -> Result<FormElement, BindError>;
    fn text_target(&self, id: &str) -> Result<Arc<dyn TextTarget>, BindError>;
    fn list_target(&self, id: &str) -> Result<Arc<dyn ListTarget>, BindError>;
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Default)]
pub struct MemoryText {
    content: Mutex<String>,
}

impl MemoryText {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: Mutex::new(content.into()),
        }
    }

    pub fn text(&self) -> String {
        lock(&self.content).clone()
    }
}

impl TextTarget for MemoryText {
    fn set_text(&self, text: &str) {
        *lock(&self.content) = text.to_string();
    }
}

#[derive(Debug, Default)]
pub struct MemoryList {
    items: Mutex<Vec<String>>,
}

impl MemoryList {
    pub fn new(items: Vec<String>) -> Self {
        Self {
            items: Mutex::new(items),
        }
    }

    pub fn items(&self) -> Vec<String> {
        lock(&self.items).clone()
    }
}

impl ListTarget for MemoryList {
    fn clear(&self) {
        lock(&self.items).clear();
    }

    fn append_item(&self, text: &str) {
        lock(&self.items).push(text.to_string());
    }
}

/// A form and the names of its fields, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormElement {
    pub id: String,
    pub fields: Vec<String>,
}

impl FormElement {
    /// Capture the values of this form's fields.
    ///
    /// Values are taken in field order; a field may carry several values.
    /// Inputs naming no field of the form are dropped.
    pub fn capture(&self, inputs: Vec<(String, FieldValue)>) -> FormSnapshot {
        for (name, _) in &inputs {
            if !self.fields.contains(name) {
                warn!("Form #{} has no field named {}; value dropped", self.id, name);
            }
        }

        let mut builder = FormSnapshot::builder();
        for field in &self.fields {
            for (name, value) in &inputs {
                if name == field {
                    builder = builder.field(name.clone(), value.clone());
                }
            }
        }
        builder.build()
    }
}

enum PageElement {
    Form(FormElement),
    Text(Arc<MemoryText>),
    List(Arc<MemoryList>),
}

/// Page parsed from HTML. Every element carrying an `id` becomes addressable;
/// its initial content is taken from the markup.
pub struct HtmlPage {
    elements: HashMap<String, PageElement>,
}

impl HtmlPage {
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);
        let mut elements = HashMap::new();

        if let Ok(selector) = Selector::parse("[id]") {
            for element in document.select(&selector) {
                let Some(id) = element.value().attr("id") else {
                    continue;
                };
                let parsed = match element.value().name() {
                    "form" => PageElement::Form(Self::parse_form(id, element)),
                    "ul" | "ol" => PageElement::List(Arc::new(MemoryList::new(
                        Self::list_items_of(element),
                    ))),
                    "input" | "textarea" | "select" | "button" => continue,
                    _ => PageElement::Text(Arc::new(MemoryText::new(
                        element.text().collect::<String>().trim(),
                    ))),
                };
                // First element with an id wins, as in a browser.
                match elements.entry(id.to_string()) {
                    Entry::Occupied(_) => warn!("Duplicate element id on page: {}", id),
                    Entry::Vacant(slot) => {
                        slot.insert(parsed);
                    }
                }
            }
        }

        debug!("Parsed page with {} addressable elements", elements.len());
        Self { elements }
    }

    fn parse_form(id: &str, form: ElementRef<'_>) -> FormElement {
        let mut fields: Vec<String> = Vec::new();
        if let Ok(selector) = Selector::parse("input[name], textarea[name], select[name]") {
            for field in form.select(&selector) {
                if let Some(name) = field.value().attr("name") {
                    if !fields.iter().any(|f| f == name) {
                        fields.push(name.to_string());
                    }
                }
            }
        }
        FormElement {
            id: id.to_string(),
            fields,
        }
    }

    fn list_items_of(list: ElementRef<'_>) -> Vec<String> {
        match Selector::parse("li") {
            Ok(selector) => list
                .select(&selector)
                .map(|item| item.text().collect::<String>())
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Current text of a text element.
    pub fn text(&self, id: &str) -> Option<String> {
        match self.elements.get(id)? {
            PageElement::Text(text) => Some(text.text()),
            _ => None,
        }
    }

    /// Current items of a list element.
    pub fn list_items(&self, id: &str) -> Option<Vec<String>> {
        match self.elements.get(id)? {
            PageElement::List(list) => Some(list.items()),
            _ => None,
        }
    }

    fn element(&self, id: &str) -> Result<&PageElement, BindError> {
        self.elements
            .get(id)
            .ok_or_else(|| BindError::MissingElement(id.to_string()))
    }
}

impl ElementLookup for HtmlPage {
    fn form(&self, id: &str) -> Result<FormElement, BindError> {
        match self.element(id)? {
            PageElement::Form(form) => Ok(form.clone()),
            _ => Err(BindError::WrongElement {
                id: id.to_string(),
                expected: "form",
            }),
        }
    }

    fn text_target(&self, id: &str) -> Result<Arc<dyn TextTarget>, BindError> {
        match self.element(id)? {
            PageElement::Text(text) => {
                let target: Arc<dyn TextTarget> = text.clone();
                Ok(target)
            }
            _ => Err(BindError::WrongElement {
                id: id.to_string(),
                expected: "text element",
            }),
        }
    }

    fn list_target(&self, id: &str) -> Result<Arc<dyn ListTarget>, BindError> {
        match self.element(id)? {
            PageElement::List(list) => {
                let target: Arc<dyn ListTarget> = list.clone();
                Ok(target)
            }
            _ => Err(BindError::WrongElement {
                id: id.to_string(),
                expected: "list",
            }),
        }
    }
}
