//! crates/recovery_companion_core/src/prompts.rs
//!
//! Prompt templates sent to the generative service. Placeholders are
//! substituted with simple string replacement; every builder is a pure
//! function of its inputs so generated prompts are deterministic.

const GUIDE_TEMPLATE: &str = r#"Create a personalized recovery guide for someone dealing with {addiction} addiction. Format the response in clear sections using Markdown.

Structure the guide as follows:

# Understanding Your Journey
[Provide a brief, empathetic explanation of {addiction} addiction, focusing on hope and the possibility of recovery]

# Today's Action Steps
- [List 3-4 specific, actionable steps they can take today to manage {addiction} cravings]
- [Make these very specific to {addiction} addiction]

# Coping Strategies
- [List 5-6 evidence-based coping mechanisms specifically for {addiction} addiction]
- [Include both immediate and long-term strategies]

# Healthy Alternatives
- [Suggest 4-5 specific activities or alternatives to replace {addiction}-related behaviors]
- [Make these practical and easily implementable]

# Progress Markers
- [List 3-4 signs of progress specific to {addiction} recovery]
- [Include both small wins and significant milestones]

# Emergency Plan
1. [Provide 3 immediate actions to take during intense {addiction} urges]
2. [Include specific grounding techniques]
3. [Add relevant crisis resources]

# Daily Affirmations
- [Include 3 powerful, personalized affirmations specific to {addiction} recovery]

Write in a supportive, encouraging tone. Focus on empowerment and growth. Avoid triggering language and ensure all advice is evidence-based and safe."#;

const RESOURCES_TEMPLATE: &str = r#"Generate personalized resources for someone recovering from {addiction} addiction.
Include:
1. A brief introduction about the addiction
2. Words of encouragement
3. 5 specific methods to mitigate the addiction, each with 3-4 detailed steps
4. 5 common withdrawal symptoms with descriptions

Format the response as a JSON object with the following structure:
{
    "introduction": "string",
    "encouragement": "string",
    "methods": [
        {
            "title": "string",
            "content": ["string", "string", "string"]
        }
    ],
    "withdrawalSymptoms": [
        {
            "title": "string",
            "description": "string"
        }
    ]
}"#;

const SENTIMENT_TEMPLATE: &str = r#"Analyze the emotional tone of the following text and classify it as one of these categories:
- positive
- neutral
- negative
- mixed

Text: "{text}"

Respond with only the category name."#;

const THERAPY_TEMPLATE: &str = r#"You are a trained therapist specializing in {addiction} addiction recovery.
The user's message shows a {sentiment} emotional tone.

Previous conversation:
{history}

User's latest message: {message}

Respond as a supportive therapist would, considering:
1. The user's emotional state
2. Their addiction context
3. The conversation history
4. Evidence-based therapeutic techniques

Keep your response empathetic, professional, and focused on recovery."#;

/// Fixed prompt requesting the journal prompt list as a JSON string array.
pub const JOURNAL_PROMPTS_REQUEST: &str = r#"Generate 7 personalized journal prompts for someone recovering from addiction.
The prompts should be:
1. Specific to addiction recovery
2. Focused on self-reflection and growth
3. Encouraging and supportive
4. Action-oriented
5. Varied in their approach (some emotional, some practical)

Format the response as a JSON array of strings."#;

/// Builds the markdown recovery-guide request for one topic.
pub fn guide_prompt(topic: &str) -> String {
    GUIDE_TEMPLATE.replace("{addiction}", topic)
}

/// Builds the structured-resources request for one topic.
pub fn resources_prompt(topic: &str) -> String {
    RESOURCES_TEMPLATE.replace("{addiction}", topic)
}

/// Builds the constrained sentiment-classification request.
pub fn sentiment_prompt(text: &str) -> String {
    SENTIMENT_TEMPLATE.replace("{text}", text)
}

/// Builds the therapeutic chat request from the session context.
pub fn therapy_prompt(topic: &str, sentiment: &str, history: &str, latest_message: &str) -> String {
    THERAPY_TEMPLATE
        .replace("{addiction}", topic)
        .replace("{sentiment}", sentiment)
        .replace("{history}", history)
        .replace("{message}", latest_message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guide_prompt_substitutes_every_placeholder() {
        let prompt = guide_prompt("smoking");
        assert!(!prompt.contains("{addiction}"));
        assert!(prompt.contains("smoking addiction"));
    }

    #[test]
    fn resources_prompt_keeps_the_json_schema_literal() {
        let prompt = resources_prompt("smoking");
        assert!(prompt.contains("\"withdrawalSymptoms\""));
        assert!(!prompt.contains("{addiction}"));
    }

    #[test]
    fn therapy_prompt_is_deterministic() {
        let a = therapy_prompt("smoking", "negative", "User: hi", "hi");
        let b = therapy_prompt("smoking", "negative", "User: hi", "hi");
        assert_eq!(a, b);
    }
}
