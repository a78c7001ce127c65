//! Core domain: events for the end of a run.

use bevy::ecs::message::Message;

/// Event fired when the player's health reaches zero
#[derive(Debug)]
pub struct PlayerDiedEvent {
    pub level_id: String,
    pub score: u32,
    pub kills: u32,
}

impl Message for PlayerDiedEvent {}

/// Event fired after the boss is defeated and the victory delay has passed
#[derive(Debug)]
pub struct LevelCompletedEvent {
    pub level_id: String,
    pub score: u32,
    pub kills: u32,
    pub coins: u32,
}

impl Message for LevelCompletedEvent {}
