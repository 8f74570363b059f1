// Response schema sent with every text request so the model answers in the AnalysisData shape.

use serde_json::{json, Value};

lazy_static::lazy_static! {
    pub static ref ANALYSIS_SCHEMA: Value = json!({
        "type": "OBJECT",
        "properties": {
            "assessment": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "percentage": { "type": "INTEGER" }
                    },
                    "required": ["name", "percentage"]
                }
            },
            "theme": { "type": "STRING" },
            "visualDescription": { "type": "STRING" },
            "vibeCheck": { "type": "STRING" },
            "deepDive": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            },
            "realityCheck": { "type": "STRING" },
            "healingRoadmap": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            }
        },
        "required": [
            "assessment",
            "theme",
            "visualDescription",
            "vibeCheck",
            "deepDive",
            "realityCheck",
            "healingRoadmap"
        ]
    });
}
