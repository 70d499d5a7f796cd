// src/analysis/roles.rs

const MAX_ROLES: usize = 3;
const FALLBACK_ROLE: &str = "Software Engineer";

/// Suggest up to three roles from the skills found in a resume.
pub fn suggest_roles(skills: &[String]) -> Vec<String> {
    let has = |skill: &str| skills.iter().any(|s| s == skill);

    let rules: [(&str, bool); 5] = [
        ("Python Developer", has("python") && has("flask")),
        (
            "Frontend Developer",
            has("html") && has("css") && has("javascript"),
        ),
        ("Machine Learning Engineer", has("machine learning") || has("nlp")),
        ("Backend Developer", has("sql") || has("mongodb")),
        ("Cloud Engineer", has("aws") || has("docker")),
    ];

    let mut roles: Vec<String> = rules
        .iter()
        .filter(|(_, matched)| *matched)
        .map(|(role, _)| role.to_string())
        .take(MAX_ROLES)
        .collect();

    if roles.is_empty() {
        roles.push(FALLBACK_ROLE.to_string());
    }
    roles
}
