/// Label set attached to gateway metrics.
#[derive(Debug, Clone, Default)]
pub struct TelemetryLabels {
    pub topic: Option<String>,
    pub source: Option<String>,
    pub extra: Vec<(String, String)>,
}

impl TelemetryLabels {
    pub fn for_topic(topic: impl Into<String>) -> Self {
        Self {
            topic: Some(topic.into()),
            ..Default::default()
        }
    }

    pub fn for_source(source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            ..Default::default()
        }
    }

    pub fn tags(&self) -> Vec<(String, String)> {
        let mut tags = Vec::with_capacity(2 + self.extra.len());
        if let Some(topic) = &self.topic {
            tags.push(("topic".into(), topic.clone()));
        }
        if let Some(source) = &self.source {
            tags.push(("source".into(), source.clone()));
        }
        for (key, value) in &self.extra {
            tags.push((key.clone(), value.clone()));
        }
        tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_include_present_fields_only() {
        let labels = TelemetryLabels::for_topic("stripe-notification-topic");
        assert_eq!(
            labels.tags(),
            vec![("topic".to_string(), "stripe-notification-topic".to_string())]
        );
    }
}
