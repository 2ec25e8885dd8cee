//! Cross-module scenarios driven through the `TestWorld` harness.
//!
//! Unit tests next to each module cover its own contract; these tests verify
//! the pieces agree with each other: chunk seams across detail levels, and
//! full camera journeys through the streaming state machine.

mod seams;
mod streaming_flow;
