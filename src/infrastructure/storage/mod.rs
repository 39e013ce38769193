mod disk_artifact_store;

pub use disk_artifact_store::DiskArtifactStore;
