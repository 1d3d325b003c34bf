use alloc::string::String;
use alloc::vec::Vec;
use core::mem;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IconNode {
    pub id: NodeId,
    pub icon: Icon,
    pub position: Point,
    pub size: Size,
    pub scale: f32,
}

impl IconNode {
    pub fn frame(&self) -> Frame {
        Frame::new(self.position, self.size.scaled(self.scale))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectionIndicatorNode {
    pub id: NodeId,
    pub position: Point,
    pub radius: f32,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParticleNode {
    pub id: NodeId,
    pub effect: ParticleEffect,
    pub position: Point,
}

/// Every visual node currently in the scene, in the order it was added.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneGraph {
    next_id: u32,
    icons: Vec<IconNode>,
    indicators: Vec<SelectionIndicatorNode>,
    particles: Vec<ParticleNode>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Default::default()
    }

    fn allocate_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn icons(&self) -> &[IconNode] {
        &self.icons
    }

    pub fn indicators(&self) -> &[SelectionIndicatorNode] {
        &self.indicators
    }

    pub fn particles(&self) -> &[ParticleNode] {
        &self.particles
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty() && self.indicators.is_empty() && self.particles.is_empty()
    }

    pub fn add_icon(&mut self, icon: Icon, position: Point, size: Size) -> NodeId {
        let id = self.allocate_id();
        self.icons.push(IconNode {
            id,
            icon,
            position,
            size,
            scale: 1.0,
        });
        id
    }

    pub fn add_indicator(&mut self, position: Point, radius: f32, label: String) -> NodeId {
        let id = self.allocate_id();
        self.indicators.push(SelectionIndicatorNode {
            id,
            position,
            radius,
            label,
        });
        id
    }

    pub fn add_particle(&mut self, effect: ParticleEffect, position: Point) -> NodeId {
        let id = self.allocate_id();
        self.particles.push(ParticleNode {
            id,
            effect,
            position,
        });
        id
    }

    /// Topmost icon whose frame contains `point`; other node kinds never block it.
    pub fn icon_at(&self, point: Point) -> Option<&IconNode> {
        self.icons
            .iter()
            .rev()
            .find(|node| node.frame().contains(point))
    }

    pub fn icon_mut(&mut self, id: NodeId) -> Option<&mut IconNode> {
        self.icons.iter_mut().find(|node| node.id == id)
    }

    pub fn take_icons(&mut self) -> Vec<IconNode> {
        mem::take(&mut self.icons)
    }

    pub fn clear_indicators(&mut self) -> usize {
        let removed = self.indicators.len();
        self.indicators.clear();
        removed
    }

    pub fn remove_particle(&mut self, id: NodeId) -> bool {
        let before = self.particles.len();
        self.particles.retain(|node| node.id != id);
        before != self.particles.len()
    }

    pub fn clear(&mut self) {
        self.icons.clear();
        self.indicators.clear();
        self.particles.clear();
    }
}
