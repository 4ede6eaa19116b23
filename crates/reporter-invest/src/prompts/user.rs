//! Task prompt templates
//!
//! One template per pipeline task, interpolated with the run's ticker and
//! reference year. Rendering happens once, at kickoff.

use crate::error::{InvestError, Result};
use minijinja::Environment;
use serde_json::json;

const NEWS_COLLECTION: &str = "\
Search for recent news about {{ ticker }} on the Brazilian stock exchange (B3) \
during {{ current_year }}. Query the news tool with the ticker and, if you can \
infer it, the company name. Collect the most relevant headlines.";

const NEWS_SYNTHESIS: &str = "\
Condense the collected headlines about {{ ticker }} into an executive news \
briefing for {{ current_year }}: main themes, overall tone, and anything \
likely to move the stock.";

const FUNDAMENTALS: &str = "\
Fetch and analyze the fundamentals of {{ ticker }}. Interpret valuation, \
profitability, dividends and size, and spell out every data-quality caveat \
the tool reports.";

const INVESTMENT_RATING: &str = "\
Write the final {{ current_year }} investment report for {{ ticker }} in \
markdown, integrating the news briefing and the fundamentals analysis, and \
close with a single rating: Buy, Hold, or Sell.";

/// Expected-output hints appended to each task prompt
pub mod expected {
    /// news_collection task
    pub const NEWS_COLLECTION: &str =
        "A structured list of up to ten headlines with title, source, date and url.";
    /// news_synthesis task
    pub const NEWS_SYNTHESIS: &str =
        "A briefing under 300 words with themes, tone, and near-term catalysts.";
    /// fundamentals task
    pub const FUNDAMENTALS: &str =
        "An interpretation of the key metrics with explicit data-quality caveats.";
    /// investment_rating task
    pub const INVESTMENT_RATING: &str =
        "A complete markdown report ending with exactly one rating: Buy, Hold, or Sell.";
}

/// The compiled task templates
pub struct TaskPrompts {
    env: Environment<'static>,
}

impl TaskPrompts {
    /// Task names, in pipeline order
    pub const TASKS: [&'static str; 4] = [
        "news_collection",
        "news_synthesis",
        "fundamentals",
        "investment_rating",
    ];

    /// Compile all task templates
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();

        let templates = [
            ("news_collection", NEWS_COLLECTION),
            ("news_synthesis", NEWS_SYNTHESIS),
            ("fundamentals", FUNDAMENTALS),
            ("investment_rating", INVESTMENT_RATING),
        ];

        for (name, source) in templates {
            env.add_template(name, source)
                .map_err(|e| InvestError::TemplateError(e.to_string()))?;
        }

        Ok(Self { env })
    }

    /// Render one task's prompt for a run
    pub fn render(&self, task: &str, ticker: &str, current_year: &str) -> Result<String> {
        let template = self
            .env
            .get_template(task)
            .map_err(|e| InvestError::TemplateError(e.to_string()))?;

        template
            .render(json!({
                "ticker": ticker,
                "current_year": current_year,
            }))
            .map_err(|e| InvestError::TemplateError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_tasks_render_with_interpolation() {
        let prompts = TaskPrompts::new().unwrap();

        for task in TaskPrompts::TASKS {
            let rendered = prompts.render(task, "BBAS3", "2026").unwrap();
            assert!(rendered.contains("BBAS3"), "{task} did not interpolate ticker");
            assert!(!rendered.contains("{{"), "{task} left template syntax behind");
        }
    }

    #[test]
    fn test_unknown_task_is_an_error() {
        let prompts = TaskPrompts::new().unwrap();
        assert!(prompts.render("made_up", "BBAS3", "2026").is_err());
    }

    #[test]
    fn test_year_interpolation() {
        let prompts = TaskPrompts::new().unwrap();
        let rendered = prompts.render("investment_rating", "PETR4", "2026").unwrap();
        assert!(rendered.contains("2026"));
    }
}
