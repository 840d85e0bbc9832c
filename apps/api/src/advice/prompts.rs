//! Prompt templates for the three advice operations.
//!
//! Inputs are opaque free text and are interpolated verbatim — no escaping,
//! no validation, empty strings included. Builders are pure so the wording
//! and the polish branch can be unit tested without a model call.

/// Career advice: improvement suggestions for a resume against a job description.
pub fn career_advice_prompt(
    position_applied: &str,
    job_description: &str,
    resume_content: &str,
) -> String {
    format!(
        "Considering the job description: {job_description},\n\
         and the resume provided: {resume_content},\n\
         identify areas for enhancement in the resume.\n\
         Offer specific suggestions on how to improve these aspects to better match\n\
         the job requirements and increase the likelihood of being selected for the\n\
         position of {position_applied}."
    )
}

/// Customized cover letter. The instruction not to introduce experience absent
/// from the resume is prompt-level only; the output is not verified.
pub fn cover_letter_prompt(
    company_name: &str,
    position_name: &str,
    job_description: &str,
    resume_content: &str,
) -> String {
    format!(
        "Generate a customized cover letter using the company name: {company_name},\n\
         the position applied for: {position_name},\n\
         and the job description: {job_description}.\n\
         Ensure the cover letter highlights my qualifications and experience as \
         detailed in the resume content: {resume_content}.\n\
         Adapt the content carefully to avoid including experiences not present in \
         my resume but mentioned in the job description.\n\
         The goal is to emphasize the alignment between my existing skills and the\n\
         requirements of the role."
    )
}

/// Resume polish. The only branch in the core: a polish prompt that is absent
/// or blank after trimming selects the general-improvement template; anything
/// else selects the instruction-driven template (interpolated untrimmed).
pub fn polish_resume_prompt(
    position_name: &str,
    resume_content: &str,
    polish_prompt: Option<&str>,
) -> String {
    match polish_prompt {
        Some(instructions) if !instructions.trim().is_empty() => format!(
            "Given the resume content: '{resume_content}',\n\
             polish it based on the following instructions: {instructions}\n\
             for the {position_name} position."
        ),
        _ => format!(
            "Suggest improvements for the following resume content:\n\
             '{resume_content}' to better align with the requirements and \
             expectations of a {position_name} position.\n\
             Return the polished version, highlighting necessary adjustments for \
             clarity, relevance,\n\
             and impact in relation to the targeted role."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_career_advice_prompt_interpolates_all_inputs() {
        let prompt = career_advice_prompt(
            "Data Engineer",
            "Looking for SQL and Python skills",
            "5 years Python, no SQL",
        );
        assert!(prompt.contains("Data Engineer"));
        assert!(prompt.contains("Looking for SQL and Python skills"));
        assert!(prompt.contains("5 years Python, no SQL"));
    }

    #[test]
    fn test_career_advice_prompt_empty_inputs_interpolate_as_empty() {
        let prompt = career_advice_prompt("", "", "");
        assert!(prompt.contains("Considering the job description: ,"));
        assert!(prompt.contains("position of ."));
    }

    #[test]
    fn test_cover_letter_prompt_interpolates_all_inputs() {
        let prompt = cover_letter_prompt(
            "Acme Corp",
            "Staff Engineer",
            "Distributed systems role",
            "10 years building storage engines",
        );
        assert!(prompt.contains("Acme Corp"));
        assert!(prompt.contains("Staff Engineer"));
        assert!(prompt.contains("Distributed systems role"));
        assert!(prompt.contains("10 years building storage engines"));
    }

    #[test]
    fn test_cover_letter_prompt_keeps_grounding_instruction() {
        let prompt = cover_letter_prompt("Acme", "Engineer", "jd", "resume");
        assert!(prompt.contains("avoid including experiences not present in my resume"));
    }

    #[test]
    fn test_polish_prompt_with_instructions_selects_instruction_branch() {
        let prompt = polish_resume_prompt("Data Engineer", "my resume", Some("make it concise"));
        assert!(prompt.contains("polish it based on the following instructions: make it concise"));
        assert!(prompt.contains("for the Data Engineer position."));
        assert!(!prompt.contains("Suggest improvements"));
    }

    #[test]
    fn test_polish_prompt_absent_selects_general_branch() {
        let prompt = polish_resume_prompt("Data Engineer", "my resume", None);
        assert!(prompt.contains("Suggest improvements"));
        assert!(prompt.contains("clarity, relevance"));
        assert!(prompt.contains("my resume"));
    }

    #[test]
    fn test_polish_prompt_blank_variants_match_absent() {
        let expected = polish_resume_prompt("Data Engineer", "my resume", None);
        assert_eq!(
            polish_resume_prompt("Data Engineer", "my resume", Some("")),
            expected
        );
        assert_eq!(
            polish_resume_prompt("Data Engineer", "my resume", Some("   ")),
            expected
        );
    }

    #[test]
    fn test_polish_prompt_instructions_interpolated_untrimmed() {
        // Branch selection trims; interpolation does not.
        let prompt = polish_resume_prompt("Engineer", "resume", Some("  tighten wording  "));
        assert!(prompt.contains("instructions:   tighten wording  \n"));
    }
}
