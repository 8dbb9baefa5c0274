//! Fixed persona and the outfit request template.

/// System instruction given to every session at creation.
pub const SYSTEM_INSTRUCTION: &str = "You are an expert fashion consultant specializing in personalized outfit recommendations. Your advice must follow these guidelines:

1. Weather Expertise: Provide temperature-appropriate, practical clothing choices that account for precipitation, wind, and layering needs.
2. Occasion Appropriateness: Match formality levels, consider social and cultural context, and ensure the outfit meets venue requirements.
3. Clothing Specifics: Name exact types of clothing items, specify colors, patterns, fabrics, and suggest relevant brands.
4. Practical Considerations: Focus on comfort, mobility, whole-day wearability, and coordinated styling.


Maintain concise, clear, and practical recommendations without any speculation or ambiguity.";

/// Requested answer layout appended to every prompt.
const RESPONSE_FORMAT: &str = "Please provide your response in this exact format:

1. MAIN OUTFIT
- Primary pieces (specify color, material, and style for each)
- Layering pieces (if needed)
- Footwear selection

2. ACCESSORIES
- Required accessories
- Optional enhancements
- Weather-specific items

3. PRACTICAL ADVICE
- Weather adaptation tips
- Comfort considerations
- Style coordination notes";

/// The user's selections for one recommendation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    pub weather: String,
    pub occasion: String,
    pub preferences: Option<String>,
}

impl PromptRequest {
    pub fn new(
        weather: impl Into<String>,
        occasion: impl Into<String>,
        preferences: Option<String>,
    ) -> Self {
        Self {
            weather: weather.into(),
            occasion: occasion.into(),
            preferences,
        }
    }

    /// Trimmed preferences, or `None` when absent or blank.
    pub fn preferences(&self) -> Option<&str> {
        self.preferences
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

/// Render the prompt text sent to the model.
pub fn build_prompt(request: &PromptRequest) -> String {
    let mut prompt = String::with_capacity(RESPONSE_FORMAT.len() + 160);
    prompt.push_str("Help me choose what to wear today.\n");
    prompt.push_str(&format!("Weather: {}\n", request.weather));
    prompt.push_str(&format!("Occasion: {}\n", request.occasion));
    if let Some(preferences) = request.preferences() {
        prompt.push_str(&format!("Additional preferences: {preferences}\n"));
    }
    prompt.push('\n');
    prompt.push_str(RESPONSE_FORMAT);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_all_selections() {
        let request = PromptRequest::new(
            "Rainy",
            "Business Meeting",
            Some("prefer dark colors".into()),
        );
        let prompt = build_prompt(&request);

        assert!(prompt.contains("Weather: Rainy"));
        assert!(prompt.contains("Occasion: Business Meeting"));
        assert!(prompt.contains("Additional preferences: prefer dark colors"));
        assert!(prompt.contains("1. MAIN OUTFIT"));
        assert!(prompt.contains("2. ACCESSORIES"));
        assert!(prompt.contains("3. PRACTICAL ADVICE"));
    }

    #[test]
    fn prompt_matches_template_exactly() {
        let request = PromptRequest::new("Rainy", "Business Meeting", Some("prefer dark colors".into()));
        let expected = "Help me choose what to wear today.
Weather: Rainy
Occasion: Business Meeting
Additional preferences: prefer dark colors

Please provide your response in this exact format:

1. MAIN OUTFIT
- Primary pieces (specify color, material, and style for each)
- Layering pieces (if needed)
- Footwear selection

2. ACCESSORIES
- Required accessories
- Optional enhancements
- Weather-specific items

3. PRACTICAL ADVICE
- Weather adaptation tips
- Comfort considerations
- Style coordination notes";
        assert_eq!(build_prompt(&request), expected);
    }

    #[test]
    fn empty_preferences_omit_the_line() {
        let request = PromptRequest::new("Sunny", "Casual", Some(String::new()));
        let prompt = build_prompt(&request);
        assert!(!prompt.contains("Additional preferences:"));
        assert!(prompt.starts_with("Help me choose what to wear today.\nWeather: Sunny\nOccasion: Casual\n\nPlease provide"));
    }

    #[test]
    fn whitespace_only_preferences_omit_the_line() {
        let request = PromptRequest::new("Sunny", "Casual", Some("   \n ".into()));
        assert!(!build_prompt(&request).contains("Additional preferences:"));
    }

    #[test]
    fn preferences_are_trimmed() {
        let request = PromptRequest::new("Cold", "Party", Some("  no wool  ".into()));
        assert!(build_prompt(&request).contains("Additional preferences: no wool\n"));
    }

    #[test]
    fn system_instruction_lists_four_guidelines() {
        assert!(SYSTEM_INSTRUCTION.starts_with("You are an expert fashion consultant"));
        for heading in [
            "1. Weather Expertise:",
            "2. Occasion Appropriateness:",
            "3. Clothing Specifics:",
            "4. Practical Considerations:",
        ] {
            assert!(SYSTEM_INSTRUCTION.contains(heading), "missing {heading}");
        }
        assert!(SYSTEM_INSTRUCTION.ends_with("without any speculation or ambiguity."));
    }
}
