//! eventscout: a conversational event discovery assistant.
//!
//! Each turn runs a fixed two-step [`workflow::Workflow`]: a profile intake
//! step seeds the user profile from survey answers, then a discovery step
//! asks a language model for a reply, letting it call the Eventbrite and
//! Ticketmaster search tools. Any failure during discovery is replaced by a
//! fixed apology reply, so a run always completes.
//!
//! # Quick Start
//!
//! ```no_run
//! use eventscout::prelude::*;
//!
//! # async fn example() -> eventscout::error::Result<()> {
//! let config = ScoutConfig::load()?;
//! let workflow = Workflow::from_config(&config)?;
//!
//! let mut state = ConversationState::new();
//! state.push_user("Find me concerts in New York");
//! let report = workflow.invoke(state).await;
//! for message in report.messages() {
//!     println!("{}", message.transcript_line());
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod prelude;
pub mod provider;
pub mod search;
pub mod session;
pub mod tools;
pub mod types;
pub mod workflow;

#[cfg(feature = "cli")]
pub mod cli;
