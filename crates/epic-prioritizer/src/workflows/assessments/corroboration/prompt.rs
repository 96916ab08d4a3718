//! Prompt construction for rating corroboration

use std::fmt::Write;

use crate::workflows::prioritization::{AssessmentDraft, CategoryCatalog};

/// Build the prompt sent to the text generator for one draft.
pub fn build_corroboration_prompt(draft: &AssessmentDraft, catalog: &CategoryCatalog) -> String {
    let mut prompt = String::new();

    prompt.push_str(
        r#"You review product epic assessments. For each value category below, read the
user's level and notes and decide whether the level is justified. Keep a level when the
notes support it; raise or lower it when they clearly point elsewhere.

Respond with a single JSON object and nothing else, using exactly these keys and only
the values "high", "mid", or "low":

```json
{"urgency": "high", "marketImpact": "mid", "strategic": "mid", "revenue": "low", "cost": "mid"}
```

"#,
    );

    let _ = writeln!(prompt, "## Epic\n\n{}", draft.epic_name);
    let _ = writeln!(prompt, "Effort: {}", draft.t_shirt_size.label());
    prompt.push('\n');

    for definition in catalog.definitions() {
        let category = definition.category;
        let _ = writeln!(prompt, "## {} (`{}`)", definition.label, category.key());
        if !definition.description.is_empty() {
            let _ = writeln!(prompt, "{}", definition.description);
        }
        for guidance in &definition.guidance {
            let _ = writeln!(prompt, "- {}: {}", guidance.label, guidance.description);
        }

        match draft.ratings.get(category) {
            Some(rating) => {
                let _ = writeln!(prompt, "User level: {}", rating.level.key());
                if !rating.notes.is_empty() {
                    let _ = writeln!(prompt, "User notes: {}", rating.notes);
                }
            }
            None => {
                let _ = writeln!(prompt, "User level: not rated");
            }
        }
        prompt.push('\n');
    }

    if !draft.overall_considerations.trim().is_empty() {
        let _ = writeln!(
            prompt,
            "## Overall considerations\n\n{}",
            draft.overall_considerations.trim()
        );
    }

    prompt
}
