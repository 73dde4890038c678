pub const CREATIVE_WRITING: &str = include_str!("../data/prompts/creative_writing.txt");
pub const TOPIC_CLAUSE: &str = include_str!("../data/prompts/topic_clause.txt");
pub const MOOD_CLAUSE: &str = include_str!("../data/prompts/mood_clause.txt");

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}

/// Build the instruction sent for `GET /creative-writing-prompt`.
///
/// Blank `topic`/`mood` values are treated as absent.
pub fn creative_writing(topic: Option<&str>, mood: Option<&str>) -> String {
    // Template files end with a newline; the clauses are glued onto one line.
    let mut input = CREATIVE_WRITING.trim_end().to_string();

    if let Some(topic) = topic.filter(|t| !t.is_empty()) {
        input.push_str(render(TOPIC_CLAUSE, &[("topic", topic)]).trim_end_matches('\n'));
    }
    if let Some(mood) = mood.filter(|m| !m.is_empty()) {
        input.push_str(render(MOOD_CLAUSE, &[("mood", mood)]).trim_end_matches('\n'));
    }

    input
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "Give me a random creative writing prompt in json format with the parameters {title, prompt, topic, mood}";

    #[test]
    fn test_render_single_var() {
        assert_eq!(
            render("Hello {{name}}!", &[("name", "world")]),
            "Hello world!"
        );
    }

    #[test]
    fn test_render_leaves_single_braces_alone() {
        assert_eq!(render("{title} {{x}}", &[("x", "y")]), "{title} y");
    }

    #[test]
    fn test_creative_writing_without_constraints() {
        assert_eq!(creative_writing(None, None), BASE);
    }

    #[test]
    fn test_creative_writing_with_topic_and_mood() {
        assert_eq!(
            creative_writing(Some("space travel"), Some("melancholy")),
            format!("{} with a topic of space travel with a mood of melancholy", BASE)
        );
    }

    #[test]
    fn test_creative_writing_mood_only() {
        assert_eq!(
            creative_writing(None, Some("hopeful")),
            format!("{} with a mood of hopeful", BASE)
        );
    }

    #[test]
    fn test_creative_writing_ignores_empty_values() {
        assert_eq!(creative_writing(Some(""), Some("")), BASE);
    }

    #[test]
    fn test_clause_templates_have_placeholders() {
        assert!(TOPIC_CLAUSE.contains("{{topic}}"));
        assert!(MOOD_CLAUSE.contains("{{mood}}"));
    }
}
