//! Layover planner server.
//!
//! A web application that answers: "I have a few hours between flights in
//! this city, what can I do with them?" Trips are checked for data-entry
//! mistakes first, then handed to a recommender for ranked suggestions that
//! can be refined in a follow-up chat.

pub mod config;
pub mod domain;
pub mod geocoding;
pub mod logging;
pub mod planner;
pub mod recommend;
pub mod sessions;
pub mod validator;
pub mod web;
