mod session_actor;
#[cfg(test)]
mod tests;

pub use session_actor::SessionActor;
