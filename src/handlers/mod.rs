pub mod secret;

pub use secret::secret_handler;
