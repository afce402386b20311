//! V'Lille station map server.
//!
//! A web application that answers: "where is the nearest V'Lille station
//! with a bike, and which station did I mean when I typed its name?"

pub mod config;
pub mod domain;
pub mod feed;
pub mod geocode;
pub mod nearby;
pub mod search;
pub mod view;
pub mod web;
