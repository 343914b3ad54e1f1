use serde_json::Value;

pub trait FirstColumn {
    fn first_column(self) -> Vec<String>;
}

impl FirstColumn for Vec<Vec<Value>> {
    // Keeps one entry per row so positions still map onto sheet rows.
    fn first_column(self) -> Vec<String> {
        self.into_iter()
            .map(|row| match row.into_iter().next() {
                Some(Value::String(s)) => s,
                Some(Value::Null) | None => String::new(),
                Some(other) => other.to_string(),
            })
            .collect::<Vec<String>>()
    }
}
