//! Fixed prompt builders for the AI drafting routes.

pub const RESUME_WRITER_SYSTEM: &str = "You are a professional resume writer. \
Write concise, achievement-oriented text in plain prose. Return only the \
requested text with no preamble, headings, or markdown.";

pub fn summary_prompt(job_title: &str, years_experience: Option<u32>, skills: &[String]) -> String {
    let mut prompt = format!(
        "Write a 2-3 sentence professional summary for a resume targeting the \
         role of {job_title}."
    );
    if let Some(years) = years_experience {
        prompt.push_str(&format!(" The candidate has {years} years of experience."));
    }
    if !skills.is_empty() {
        prompt.push_str(&format!(" Key skills: {}.", skills.join(", ")));
    }
    prompt
}

pub fn enhance_prompt(text: &str, instruction: Option<&str>) -> String {
    let instruction = instruction
        .unwrap_or("Make it more concise and achievement-oriented without inventing facts");
    format!(
        "Rewrite the following resume text. {instruction}.\n\nText:\n{text}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_prompt_includes_role() {
        let prompt = summary_prompt("Backend Engineer", None, &[]);
        assert!(prompt.contains("Backend Engineer"));
        assert!(!prompt.contains("years of experience"));
    }

    #[test]
    fn test_summary_prompt_includes_years_and_skills() {
        let skills = vec!["Rust".to_string(), "PostgreSQL".to_string()];
        let prompt = summary_prompt("Backend Engineer", Some(7), &skills);
        assert!(prompt.contains("7 years"));
        assert!(prompt.contains("Rust, PostgreSQL"));
    }

    #[test]
    fn test_enhance_prompt_default_instruction() {
        let prompt = enhance_prompt("Worked on stuff", None);
        assert!(prompt.contains("Worked on stuff"));
        assert!(prompt.contains("concise"));
    }

    #[test]
    fn test_enhance_prompt_custom_instruction() {
        let prompt = enhance_prompt("Worked on stuff", Some("Use a formal tone"));
        assert!(prompt.contains("Use a formal tone"));
    }
}
