pub mod build_runner;
pub mod changelog_editor;
pub mod descriptor_editor;
pub mod interaction;
pub mod manifest_editor;
pub mod project_scanner;
pub mod version_control;

pub use build_runner::PackagingAgent;
pub use changelog_editor::ChangelogEditor;
pub use descriptor_editor::DescriptorEditor;
pub use interaction::ReleaseInteraction;
pub use manifest_editor::ManifestEditor;
pub use project_scanner::ProjectScannerAgent;
pub use version_control::VersionControlAgent;
