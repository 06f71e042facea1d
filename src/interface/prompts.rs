use dialoguer::{Confirm, Input, Select};
use strsim::jaro_winkler;

use crate::error::{ForecastError, Result};
use crate::models::{OptionId, OptionRecord};

/// Minimum Jaro-Winkler similarity for a fuzzy option match.
const FUZZY_THRESHOLD: f64 = 0.7;

/// Prompt for the forecast temperature of the prediction date.
pub fn prompt_temperature() -> Result<f64> {
    let input: String = Input::new()
        .with_prompt("What is the forecast temperature for the day?")
        .interact_text()?;

    parse_temperature(&input)
}

fn parse_temperature(input: &str) -> Result<f64> {
    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| ForecastError::InvalidInput("Invalid temperature".to_string()))?;
    if !value.is_finite() {
        return Err(ForecastError::InvalidInput("Invalid temperature".to_string()));
    }
    Ok(value)
}

/// Find options matching `input`, best first.
///
/// An exact (case-insensitive) name or id match wins outright; otherwise
/// names scoring above the fuzzy threshold are returned.
pub fn match_options<'a>(options: &'a [OptionRecord], input: &str) -> Vec<&'a OptionRecord> {
    let needle = input.trim().to_lowercase();

    let exact = options.iter().find(|o| {
        o.option_id.to_string() == needle
            || o.name.as_deref().map(str::to_lowercase).as_deref() == Some(needle.as_str())
    });
    if let Some(option) = exact {
        return vec![option];
    }

    let mut candidates: Vec<(&OptionRecord, f64)> = options
        .iter()
        .filter_map(|o| {
            let name = o.name.as_deref()?;
            Some((o, jaro_winkler(&name.to_lowercase(), &needle)))
        })
        .filter(|(_, score)| *score > FUZZY_THRESHOLD)
        .collect();

    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    candidates.into_iter().map(|(o, _)| o).collect()
}

/// Prompt for the options on the prediction menu, by name or id.
pub fn prompt_menu(options: &[OptionRecord]) -> Result<Vec<OptionId>> {
    let mut menu: Vec<OptionId> = Vec::new();

    loop {
        let input: String = Input::new()
            .with_prompt("Add a menu option (or press Enter to finish)")
            .allow_empty(true)
            .interact_text()?;

        let input = input.trim();
        if input.is_empty() {
            if menu.is_empty() {
                println!("The menu needs at least one option.");
                continue;
            }
            break;
        }

        let candidates = match_options(options, input);

        let chosen = match candidates.as_slice() {
            [] => {
                println!("No matching option found for '{}'", input);
                None
            }
            [only] if only.option_id.to_string() == input
                || only.label().to_lowercase() == input.to_lowercase() =>
            {
                Some(*only)
            }
            [only] => {
                let confirm = Confirm::new()
                    .with_prompt(format!("Did you mean '{}'?", only.label()))
                    .default(true)
                    .interact()?;
                confirm.then_some(*only)
            }
            many => {
                let labels: Vec<String> = many.iter().take(5).map(|o| o.label()).collect();
                let mut items = labels.clone();
                items.push("None of these".to_string());

                let selection = Select::new()
                    .with_prompt("Which did you mean?")
                    .items(&items)
                    .default(0)
                    .interact()?;

                (selection < labels.len()).then(|| many[selection])
            }
        };

        if let Some(option) = chosen {
            if menu.contains(&option.option_id) {
                println!("{} is already on the menu", option.label());
            } else {
                menu.push(option.option_id);
                println!("Added: {}", option.label());
            }
        }
    }

    Ok(menu)
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<OptionRecord> {
        vec![
            OptionRecord {
                option_id: 1,
                name: Some("Chicken Curry".to_string()),
            },
            OptionRecord {
                option_id: 2,
                name: Some("Chicken Wrap".to_string()),
            },
            OptionRecord {
                option_id: 3,
                name: Some("Tomato Soup".to_string()),
            },
            OptionRecord {
                option_id: 4,
                name: None,
            },
        ]
    }

    #[test]
    fn test_exact_name_match() {
        let opts = options();
        let matches = match_options(&opts, "tomato soup");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].option_id, 3);
    }

    #[test]
    fn test_id_match() {
        let opts = options();
        let matches = match_options(&opts, "4");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].option_id, 4);
    }

    #[test]
    fn test_fuzzy_match_ranks_closest_first() {
        let opts = options();
        let matches = match_options(&opts, "chicken cury");
        assert!(!matches.is_empty());
        assert_eq!(matches[0].option_id, 1);
    }

    #[test]
    fn test_no_match() {
        let opts = options();
        assert!(match_options(&opts, "xyzzy").is_empty());
    }

    #[test]
    fn test_parse_temperature() {
        assert_eq!(parse_temperature(" 17.5 ").unwrap(), 17.5);
        assert_eq!(parse_temperature("-3").unwrap(), -3.0);
        assert!(parse_temperature("warm").is_err());
        assert!(parse_temperature("NaN").is_err());
    }
}
