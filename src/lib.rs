//! Cookies for Cletus — a side-scrolling terminal shooter.
//!
//! Cletus holds the left edge while waves of hippies walk in from the
//! right.  Shooting a hippie scores points; letting one through costs a
//! life.  Cookies drift past now and then: catch one for an extra life,
//! but shooting one costs points.

pub mod assets;
pub mod capabilities;
pub mod clock;
pub mod collision;
pub mod config;
pub mod display;
pub mod entities;
pub mod game;
pub mod input;
pub mod wave;
