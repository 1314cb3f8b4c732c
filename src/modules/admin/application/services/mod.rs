pub mod admin_console;
pub mod admin_workspaces;
pub mod entity_manager;
pub mod profile_manager;

pub use admin_console::{AdminConsole, ConsoleError, ConsoleFactory, ConsoleSnapshot};
pub use admin_workspaces::{AdminWorkspaces, SharedConsole, SignedIn};
pub use entity_manager::{CollectionManager, EntityManager};
pub use profile_manager::ProfileManager;
