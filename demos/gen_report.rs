//! Generate an insight report for validation testing

fn main() {
    let json = r#"[
        { "date": "2024-05-22T09:00:00Z", "mood": "interfase", "intensity": 3 },
        { "date": "2024-05-23T21:30:00Z", "mood": "depressive", "intensity": 7,
          "depressiveSymptoms": { "insomnia": true },
          "triggers": { "stress": true } },
        { "date": "2024-05-24T08:15:00Z", "mood": "manic", "intensity": 8,
          "manicSymptoms": { "racingThoughts": true, "reducedSleep": true } },
        { "date": "2024-05-25T19:00:00Z", "mood": "interfase", "intensity": 4 }
    ]"#;

    match moodlens::analyze_json(json, None) {
        Ok(report) => match serde_json::to_string_pretty(&report) {
            Ok(rendered) => println!("{rendered}"),
            Err(e) => eprintln!("Error: {e:?}"),
        },
        Err(e) => eprintln!("Error: {e:?}"),
    }
}
