// src/analysis/skills.rs

/// Skills recognised in resumes and job descriptions, in reporting order.
pub const KNOWN_SKILLS: &[&str] = &[
    "python",
    "java",
    "c++",
    "html",
    "css",
    "javascript",
    "machine learning",
    "deep learning",
    "nlp",
    "flask",
    "django",
    "react",
    "node",
    "sql",
    "mongodb",
    "aws",
    "docker",
];

/// Known skills occurring anywhere in the raw text, case-insensitively.
///
/// Matching is by substring, so "java" is also reported for "javascript".
pub fn extract_skills(text: &str) -> Vec<String> {
    let text = text.to_lowercase();
    KNOWN_SKILLS
        .iter()
        .filter(|skill| text.contains(*skill))
        .map(|skill| skill.to_string())
        .collect()
}

/// Skills the job asks for that the resume does not show.
pub fn missing_skills(resume_skills: &[String], job_skills: &[String]) -> Vec<String> {
    job_skills
        .iter()
        .filter(|skill| !resume_skills.contains(skill))
        .cloned()
        .collect()
}
