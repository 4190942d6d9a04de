use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The pod doesn't exist in the given namespace
    #[error("{namespace}/{name}: pod not present")]
    PodNotPresent { namespace: String, name: String },
    /// Anything else the api server (or the road to it) threw at us
    #[error("kubernetes error: {0}")]
    Transport(#[from] kube::Error),
    /// Accessor missing, or the client couldn't be set up
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl Error {
    pub fn pod_not_present(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::PodNotPresent {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
