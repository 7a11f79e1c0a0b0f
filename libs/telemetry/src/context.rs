#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TelemetryLabels {
    pub connection: Option<String>,
    pub msgtype: Option<String>,
    pub task_id: Option<String>,
    pub run_id: Option<String>,
    pub extra: Vec<(String, String)>,
}

impl TelemetryLabels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_connection(mut self, connection: impl Into<String>) -> Self {
        self.connection = Some(connection.into());
        self
    }

    pub fn with_msgtype(mut self, msgtype: impl Into<String>) -> Self {
        self.msgtype = Some(msgtype.into());
        self
    }

    pub fn with_run(mut self, task_id: impl Into<String>, run_id: impl Into<String>) -> Self {
        self.task_id = Some(task_id.into());
        self.run_id = Some(run_id.into());
        self
    }

    /// Low-cardinality tags suitable for metrics. Task and run ids are left
    /// to spans.
    pub fn tags(&self) -> Vec<(String, String)> {
        let mut tags = Vec::with_capacity(2 + self.extra.len());
        if let Some(connection) = &self.connection {
            tags.push(("connection".into(), connection.clone()));
        }
        if let Some(msgtype) = &self.msgtype {
            tags.push(("msgtype".into(), msgtype.clone()));
        }
        for (key, value) in &self.extra {
            tags.push((key.clone(), value.clone()));
        }
        tags
    }
}

#[derive(Debug, Clone)]
pub struct MessageContext {
    pub labels: TelemetryLabels,
}

impl MessageContext {
    pub fn new(labels: TelemetryLabels) -> Self {
        Self { labels }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_skip_run_identifiers() {
        let mut labels = TelemetryLabels::new()
            .with_connection("wechat_default")
            .with_msgtype("text")
            .with_run("notify", "run-1");
        labels.extra.push(("outcome".into(), "sent".into()));
        assert_eq!(
            labels.tags(),
            vec![
                ("connection".to_string(), "wechat_default".to_string()),
                ("msgtype".to_string(), "text".to_string()),
                ("outcome".to_string(), "sent".to_string()),
            ]
        );
    }
}
