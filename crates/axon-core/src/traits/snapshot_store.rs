use crate::errors::AxonResult;
use crate::models::snapshot::SystemImage;

/// Durable persistence for the graph plus learning tables. The on-disk
/// format is owned by the implementation; callers only see images.
pub trait SnapshotStore: Send + Sync {
    /// Replace the stored image with `image`.
    fn save(&self, image: &SystemImage) -> AxonResult<()>;

    /// Load the stored image. An empty store yields an empty image.
    fn load(&self) -> AxonResult<SystemImage>;
}
