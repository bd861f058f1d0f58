//! Hover highlighting and click selection of chains.

use crate::constants::CHAIN_NAME_PREFIX;
use log::debug;

pub type ObjectId = usize;

/// One ray intersection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub object: ObjectId,
    pub distance: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HoverState {
    #[default]
    Idle,
    Hovering {
        object: ObjectId,
        original_color: u32,
    },
}

/// Objects whose colour the picker may read and overwrite.
pub trait PickTarget {
    fn object_name(&self, object: ObjectId) -> Option<&str>;
    fn color(&self, object: ObjectId) -> Option<u32>;
    fn set_color(&mut self, object: ObjectId, color: u32);
}

pub fn is_chain_name(name: &str) -> bool {
    name.starts_with(CHAIN_NAME_PREFIX)
}

/// `chainK` -> `K` for K >= 1.
pub fn chain_number(name: &str) -> Option<usize> {
    name.strip_prefix(CHAIN_NAME_PREFIX)?
        .parse::<usize>()
        .ok()
        .filter(|&k| k >= 1)
}

/// Nearest hit on a chain; `hits` may be in any order.
pub fn nearest_chain_hit<T: PickTarget + ?Sized>(hits: &[Hit], target: &T) -> Option<Hit> {
    hits.iter()
        .filter(|h| target.object_name(h.object).is_some_and(is_chain_name))
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
        .copied()
}

#[derive(Clone, Debug)]
pub struct PickController {
    state: HoverState,
    highlight_color: u32,
}

impl PickController {
    pub fn new(highlight_color: u32) -> Self {
        Self {
            state: HoverState::Idle,
            highlight_color,
        }
    }

    pub fn state(&self) -> HoverState {
        self.state
    }

    pub fn highlight_color(&self) -> u32 {
        self.highlight_color
    }

    /// Apply a pointer move. Returns true when any colour changed.
    pub fn pointer_move<T: PickTarget + ?Sized>(&mut self, hits: &[Hit], target: &mut T) -> bool {
        let Some(hit) = nearest_chain_hit(hits, &*target) else {
            return self.restore(target);
        };
        if let HoverState::Hovering { object, .. } = self.state {
            if object == hit.object {
                return false;
            }
        }
        self.restore(target);
        let Some(original_color) = target.color(hit.object) else {
            return true;
        };
        target.set_color(hit.object, self.highlight_color);
        self.state = HoverState::Hovering {
            object: hit.object,
            original_color,
        };
        debug!(
            "[pick] hover {}",
            target.object_name(hit.object).unwrap_or_default()
        );
        true
    }

    /// The chain number under the pointer, if any.
    pub fn click<T: PickTarget + ?Sized>(&self, hits: &[Hit], target: &T) -> Option<usize> {
        let hit = nearest_chain_hit(hits, target)?;
        target.object_name(hit.object).and_then(chain_number)
    }

    fn restore<T: PickTarget + ?Sized>(&mut self, target: &mut T) -> bool {
        match std::mem::take(&mut self.state) {
            HoverState::Idle => false,
            HoverState::Hovering {
                object,
                original_color,
            } => {
                target.set_color(object, original_color);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(Vec<(&'static str, u32)>);

    impl PickTarget for Named {
        fn object_name(&self, object: ObjectId) -> Option<&str> {
            self.0.get(object).map(|(n, _)| *n)
        }
        fn color(&self, object: ObjectId) -> Option<u32> {
            self.0.get(object).map(|(_, c)| *c)
        }
        fn set_color(&mut self, object: ObjectId, color: u32) {
            if let Some(slot) = self.0.get_mut(object) {
                slot.1 = color;
            }
        }
    }

    #[test]
    fn chain_numbers() {
        assert_eq!(chain_number("chain3"), Some(3));
        assert_eq!(chain_number("chain0"), None);
        assert_eq!(chain_number("chainx"), None);
        assert_eq!(chain_number("vessel"), None);
    }

    #[test]
    fn non_chain_hits_are_ignored() {
        let mut t = Named(vec![("vessel", 1), ("chain1", 2)]);
        let mut p = PickController::new(9);
        let hits = [
            Hit { object: 0, distance: 1.0 },
            Hit { object: 1, distance: 5.0 },
        ];
        assert!(p.pointer_move(&hits, &mut t));
        assert_eq!(t.0[0].1, 1);
        assert_eq!(t.0[1].1, 9);
        assert_eq!(p.click(&hits, &t), Some(1));
    }
}
