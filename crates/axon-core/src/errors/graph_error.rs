/// Graph store errors.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("node not found: {id}")]
    NodeNotFound { id: String },

    #[error("edge not found: {id}")]
    EdgeNotFound { id: String },

    #[error("a node may not contain itself: {id}")]
    SelfContainment { id: String },
}
