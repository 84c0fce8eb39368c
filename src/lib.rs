pub mod api;
pub mod cards;
pub mod config;
pub mod controller;
pub mod data_models;
pub mod fetcher;
pub mod normalizer;
pub mod views;
