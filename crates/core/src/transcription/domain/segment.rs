use serde::{Deserialize, Serialize};

/// One window's transcription: its time span in seconds and decoded text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub id: usize,
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl Segment {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_segment_duration() {
        let s = Segment {
            id: 0,
            start: 20.0,
            end: 32.5,
            text: "namaste".to_string(),
        };
        assert_relative_eq!(s.duration(), 12.5);
    }

    #[test]
    fn test_segment_serializes_fields_in_order() {
        let s = Segment {
            id: 1,
            start: 0.0,
            end: 20.0,
            text: "kya haal hai".to_string(),
        };
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(
            json,
            r#"{"id":1,"start":0.0,"end":20.0,"text":"kya haal hai"}"#
        );
    }
}
