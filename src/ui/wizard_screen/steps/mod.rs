//! Render methods for each wizard page

mod objects;
mod parameters;
mod send;
