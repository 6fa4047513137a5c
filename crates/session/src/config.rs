/// Where and how the session connects. The capture device itself is acquired
/// by the host platform and handed in separately.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub endpoint: String,
    pub extra_headers: Vec<(String, String)>,
}

impl SessionConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            extra_headers: Vec::new(),
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.push((name.into(), value.into()));
        self
    }
}
