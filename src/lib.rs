// Library root
// -----------
// The binary (`main.rs`) is a thin wrapper around these modules.
//
// Module responsibilities:
// - `api`: HTTP calls to the leaderboard service (list leaderboards,
//   list GPUs, submit a solution file).
// - `ui`: the interactive submit flow: menus, prompts, spinners and
//   result printing. Delegates requests to `api`.
// - `cli`: command-line definitions.
// - `error`: the error cases the flow reports by name.
pub mod api;
pub mod cli;
pub mod error;
pub mod ui;
