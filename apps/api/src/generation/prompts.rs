//! Prompt construction for the interview-question generation call.

use crate::generation::validator::InterviewRequest;

/// Substituted when the request carries no tech stack.
pub const TECHSTACK_FALLBACK: &str = "General concepts relevant to the role";

/// Deterministically renders a validated request into the generation prompt.
/// Pure function: same request, same prompt.
pub fn build_interview_prompt(request: &InterviewRequest) -> String {
    let techstack = if request.techstack.is_empty() {
        TECHSTACK_FALLBACK
    } else {
        request.techstack.as_str()
    };

    format!(
        r#"You are an expert interview question writer. Your goal is to create high-quality, targeted interview questions.

**Instructions:**
1.  **Role:** {role}
2.  **Experience Level:** {level}
3.  **Tech Stack:** {techstack}
4.  **Focus:** {focus}
5.  **Number of Questions:** Generate exactly {amount} questions.

**Question Requirements:**
- Match difficulty to the experience level (e.g., Senior questions should cover architecture, scalability, and leadership).
- Ground technical questions in the specified tech stack.
- Balance the question types based on the focus (~80/20 for technical/behavioral, 50/50 for balanced).
- Ensure each question is open-ended, practical, and covers a single topic.
- Keep questions clear, direct, and under 25 words.
- Format for a voice assistant: use only letters, numbers, spaces, commas, periods, and question marks. Avoid all special characters, lists, or code formatting inside the question text itself.

Your final output must be only the JSON object defined by the schema."#,
        role = request.role,
        level = request.level,
        techstack = techstack,
        focus = request.interview_type,
        amount = request.amount,
    )
}
