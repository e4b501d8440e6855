//! Pipe pairs and the catalog of gap placements
//!
//! A pipe pair is a single column: an upper pipe hanging from the top of
//! the world and a lower pipe standing on the ground, with an opening
//! between them.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::bounds::Bounds;
use crate::config::GeometryConfig;
use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipePair {
    /// Column footprint, from the top of the world down to the ground line
    pub bounds: Bounds,
    /// Bottom edge of the upper pipe (upper edge of the opening)
    pub gap_bottom: i32,
    /// Top edge of the lower pipe (lower edge of the opening)
    pub gap_top: i32,
}

impl PipePair {
    pub fn gap_height(&self) -> i32 {
        self.gap_top - self.gap_bottom
    }

    /// Overwrite shape and position from a template, keeping this slot
    pub fn reset_from(&mut self, template: &PipePair) {
        self.gap_bottom = template.gap_bottom;
        self.gap_top = template.gap_top;
        self.bounds = template.bounds;
    }

    /// Scroll left by `speed` pixels
    #[inline]
    pub fn roll(&mut self, speed: i32) {
        self.bounds.offset(-speed, 0);
    }
}

/// Every legal gap placement for one world geometry, top to bottom
#[derive(Debug, Clone)]
pub struct TemplateSet {
    templates: Vec<PipePair>,
}

impl TemplateSet {
    /// Build templates parked just past the right edge of `world`.
    ///
    /// Gaps start one margin below the top and step down until the opening
    /// would reach the ground line. Fails if not even the first one fits.
    pub fn build(
        world: &Bounds,
        ground_top: i32,
        obstacle_width: i32,
        geometry: &GeometryConfig,
    ) -> Result<Self, ConfigError> {
        let height = world.height();
        let gap = geometry.gap.of(height);
        let step = geometry.step.of(height);
        let first_top = world.top + geometry.margin.of(height);

        if gap <= 0 || step <= 0 || first_top + gap >= ground_top {
            return Err(ConfigError::NoGapPlacement {
                first_top,
                gap,
                ground_top,
            });
        }

        let column = Bounds::new(world.right, world.top, world.right + obstacle_width, ground_top);
        let mut templates = Vec::new();
        let mut top = first_top;
        while top + gap < ground_top {
            templates.push(PipePair {
                bounds: column,
                gap_bottom: top,
                gap_top: top + gap,
            });
            top += step;
        }

        log::debug!(
            "built {} pipe templates (gap={}, step={}, ground={})",
            templates.len(),
            gap,
            step,
            ground_top
        );
        Ok(Self { templates })
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Never true for a set returned by [`TemplateSet::build`]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Uniformly random placement
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &PipePair {
        &self.templates[rng.random_range(0..self.templates.len())]
    }

    pub fn get(&self, index: usize) -> Option<&PipePair> {
        self.templates.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PipePair> {
        self.templates.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn build(width: i32, height: i32) -> Result<TemplateSet, ConfigError> {
        let geometry = GeometryConfig::default();
        let world = Bounds::new(0, 0, width, height);
        let ground = geometry.ground_line.of(height);
        TemplateSet::build(&world, ground, 130, &geometry)
    }

    #[test]
    fn test_default_world_templates() {
        let set = build(720, 1280).unwrap();
        // Gaps at 128, 256, 384, 512; a gap at 640 would touch the ground
        assert_eq!(set.len(), 4);
        let tops: Vec<i32> = set.iter().map(|p| p.gap_bottom).collect();
        assert_eq!(tops, vec![128, 256, 384, 512]);
        for p in set.iter() {
            assert_eq!(p.gap_height(), 384);
            assert_eq!(p.bounds, Bounds::new(720, 0, 850, 1024));
        }
    }

    #[test]
    fn test_world_offset_respected() {
        let geometry = GeometryConfig::default();
        let world = Bounds::new(50, 100, 770, 1100);
        let ground = world.top + geometry.ground_line.of(world.height());
        let set = TemplateSet::build(&world, ground, 100, &geometry).unwrap();
        let first = set.get(0).unwrap();
        assert_eq!(first.gap_bottom, 200);
        assert_eq!(first.bounds.left, 770);
        assert_eq!(first.bounds.top, 100);
        assert_eq!(first.bounds.bottom, ground);
    }

    #[test]
    fn test_too_short_world_is_error() {
        let geometry = GeometryConfig {
            ground_line: crate::config::Ratio::new(2, 5),
            ..Default::default()
        };
        let world = Bounds::new(0, 0, 720, 1280);
        let ground = geometry.ground_line.of(1280);
        let err = TemplateSet::build(&world, ground, 130, &geometry).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NoGapPlacement {
                first_top: 128,
                gap: 384,
                ground_top: 512
            }
        ));
    }

    #[test]
    fn test_tiny_world_is_error() {
        assert!(build(10, 5).is_err());
    }

    #[test]
    fn test_choose_covers_every_template() {
        use rand::SeedableRng;
        let set = build(720, 1280).unwrap();
        let mut rng = rand_pcg::Pcg32::seed_from_u64(42);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let pick = set.choose(&mut rng);
            let index = set.iter().position(|p| p == pick).unwrap();
            seen[index] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_reset_from_keeps_nothing_of_old_shape() {
        let set = build(720, 1280).unwrap();
        let mut live = *set.get(0).unwrap();
        live.roll(900);
        live.reset_from(set.get(3).unwrap());
        assert_eq!(live, *set.get(3).unwrap());
    }

    proptest! {
        #[test]
        fn prop_template_gaps_and_count(height in 40i32..5000) {
            let geometry = GeometryConfig::default();
            let ground = geometry.ground_line.of(height);
            let margin = height / 10;
            let gap = height * 3 / 10;
            let step = height / 10;

            match build(720, height) {
                Ok(set) => {
                    prop_assert!(!set.is_empty());
                    let expected = ((ground - margin - gap - 1) / step + 1) as usize;
                    prop_assert_eq!(set.len(), expected);
                    for p in set.iter() {
                        prop_assert_eq!(p.gap_height(), gap);
                        prop_assert!(p.gap_bottom < p.gap_top);
                        prop_assert!(p.gap_top < ground);
                    }
                }
                Err(_) => prop_assert!(margin + gap >= ground),
            }
        }
    }
}
