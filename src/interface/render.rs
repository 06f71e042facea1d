use crate::forecast::Student;
use crate::models::{Forecast, ForecastRequest};
use crate::state::Dataset;

/// Display a forecast as a table of expected portions per option.
pub fn display_forecast(forecast: &Forecast, request: &ForecastRequest, dataset: &Dataset) {
    if forecast.is_empty() {
        println!("No forecast generated (empty menu).");
        return;
    }

    println!();
    println!(
        "=== Forecast for {} at {:.1}° ===",
        request.prediction_date, request.prediction_temperature
    );
    println!();

    let names: Vec<(u32, String, f64)> = forecast
        .iter()
        .map(|(id, q)| (id, dataset.option_name(id), q))
        .collect();
    let max_name_len = names.iter().map(|(_, n, _)| n.len()).max().unwrap_or(10);

    for (i, (option_id, name, quantity)) in names.iter().enumerate() {
        println!(
            "{:>3}. {:<width$} - {:>7.2} expected => {:>4} portions",
            i + 1,
            name,
            quantity,
            forecast.rounded(*option_id),
            width = max_name_len
        );
    }

    let rounded_total: u32 = names.iter().map(|(id, _, _)| forecast.rounded(*id)).sum();

    println!();
    println!("--- Summary ---");
    println!("Options: {}", forecast.len());
    println!("Total expected: {:.2}", forecast.total());
    println!("Total portions: {}", rounded_total);
    println!();
}

/// Display each student's order likelihood and their strongest preferences.
pub fn display_students(students: &[Student], dataset: &Dataset, top: usize) {
    if students.is_empty() {
        println!("No students.");
        return;
    }

    println!();
    println!("=== Students ({}) ===", students.len());
    println!();

    for student in students {
        let mut prefs: Vec<_> = student
            .options()
            .iter()
            .filter(|o| o.priority > 0.0)
            .collect();
        prefs.sort_by(|a, b| {
            b.priority
                .partial_cmp(&a.priority)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let prefs_str = if prefs.is_empty() {
            "(no history)".to_string()
        } else {
            prefs
                .iter()
                .take(top)
                .map(|o| format!("{} {:.2}", dataset.option_name(o.option_id), o.priority))
                .collect::<Vec<_>>()
                .join(", ")
        };

        println!(
            "  {:>6}  orders {:>3}  likelihood {:.2}  {}",
            student.id(),
            student.orders().len(),
            student.order_likelihood(),
            prefs_str
        );
    }

    println!();
}
