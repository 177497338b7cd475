//! Kaleidoscope-style mirroring expressed as imagemagick directives.
//!
//! `mirrorize` does not touch pixels. It appends a fixed directive template to
//! a queue, which is later executed by the in-process engine or handed to an
//! external `magick` binary.

use crate::{
    arg_parsers::{CropGeometry, Direction, Gravity, ImageSelection, RotateGeometry},
    error::MagickError,
    operations::{Axis, Directive},
    wm_err,
};

/// Anything that collects directives for later execution.
pub trait DirectiveQueue {
    /// Whether the backend understands the full imagemagick directive language.
    /// Mirrorize does nothing on queues that return `false`.
    fn supports_directives(&self) -> bool;

    fn push_directive(&mut self, directive: Directive);
}

/// Adds `mirrorize` to every [`DirectiveQueue`].
pub trait Mirrorize: DirectiveQueue {
    /// Mirrors the image towards `direction`, which defaults to west when absent or empty.
    ///
    /// Unrecognized directions queue nothing and are only reported in the log.
    fn mirrorize<'a>(&mut self, direction: impl Into<Option<&'a str>>) -> &mut Self {
        let direction = direction.into();
        if !self.supports_directives() {
            tracing::debug!(?direction, "backend lacks directive support, not mirrorizing");
            return self;
        }
        match Direction::resolve(direction) {
            Some(direction) => self.mirrorize_towards(direction),
            None => {
                tracing::warn!(?direction, "ignoring mirrorize with unrecognized direction");
                self
            }
        }
    }

    /// Like [`Mirrorize::mirrorize`], but an unrecognized direction is an error.
    /// Backends without directive support still accept anything and queue nothing.
    fn try_mirrorize(&mut self, direction: &str) -> Result<&mut Self, MagickError> {
        if !self.supports_directives() {
            return Ok(self);
        }
        match Direction::resolve(Some(direction)) {
            Some(direction) => Ok(self.mirrorize_towards(direction)),
            None => Err(wm_err!("unrecognized mirrorize direction `{direction}'")),
        }
    }

    fn mirrorize_towards(&mut self, direction: Direction) -> &mut Self {
        if !self.supports_directives() {
            return self;
        }
        let directives = template(direction);
        tracing::debug!(%direction, count = directives.len(), "queueing mirrorize");
        for directive in directives {
            self.push_directive(directive);
        }
        self
    }
}

impl<T: DirectiveQueue + ?Sized> Mirrorize for T {}

/// The directives that mirror an image towards `direction`.
///
/// The kept part is cropped off and reflected. Diagonals keep a quadrant, build
/// its three reflections and assemble the 2x2 tile so that the kept quadrant
/// stays unflipped in its original corner.
pub fn template(direction: Direction) -> Vec<Directive> {
    let (anchor, crop) = match direction {
        Direction::North => (Gravity::NorthWest, CropGeometry::percent(100.0, 50.0)),
        Direction::South => (Gravity::South, CropGeometry::percent(100.0, 50.0)),
        Direction::West => (Gravity::NorthWest, CropGeometry::percent(50.0, 100.0)),
        Direction::East => (Gravity::East, CropGeometry::percent(50.0, 100.0)),
        Direction::NorthWest => (Gravity::NorthWest, CropGeometry::percent(50.0, 50.0)),
        Direction::NorthEast => (Gravity::NorthEast, CropGeometry::percent(50.0, 50.0)),
        Direction::SouthWest => (Gravity::SouthWest, CropGeometry::percent(50.0, 50.0)),
        Direction::SouthEast => (Gravity::SouthEast, CropGeometry::percent(50.0, 50.0)),
    };
    let mut directives = vec![
        Directive::Gravity(anchor),
        Directive::Crop(crop),
        Directive::Repage,
    ];

    match direction {
        Direction::North | Direction::South => {
            directives.extend(reflected(Directive::CloneLast, Directive::Flip));
            if direction == Direction::South {
                directives.push(Directive::Swap);
            }
            directives.push(Directive::Append(Axis::Vertical));
        }
        Direction::West | Direction::East => {
            directives.extend(reflected(Directive::CloneLast, Directive::Flop));
            if direction == Direction::East {
                directives.push(Directive::Swap);
            }
            directives.push(Directive::Append(Axis::Horizontal));
        }
        Direction::NorthWest
        | Direction::NorthEast
        | Direction::SouthWest
        | Direction::SouthEast => {
            // list after the reflections: 0 kept, 1 flopped, 2 flipped, 3 rotated
            let reflections = [
                Directive::Flop,
                Directive::Flip,
                Directive::Rotate(RotateGeometry::degrees(180.0)),
            ];
            for reflection in reflections {
                directives.extend(reflected(clone_of(0), reflection));
            }
            let rows: [[i64; 2]; 2] = match direction {
                Direction::NorthWest => [[0, 1], [2, 3]],
                Direction::NorthEast => [[1, 0], [3, 2]],
                Direction::SouthWest => [[2, 3], [0, 1]],
                _ => [[3, 2], [1, 0]],
            };
            for [left, right] in rows {
                directives.extend([
                    Directive::OpenGroup,
                    clone_of(left),
                    clone_of(right),
                    Directive::Append(Axis::Horizontal),
                    Directive::CloseGroup,
                ]);
            }
            directives.extend([
                Directive::Delete(ImageSelection::range(0, 3)),
                Directive::Append(Axis::Vertical),
            ]);
        }
    }

    directives.push(Directive::Gravity(Gravity::NorthWest));
    directives
}

/// `( <clone> <reflection> )`
fn reflected(clone: Directive, reflection: Directive) -> [Directive; 4] {
    [Directive::OpenGroup, clone, reflection, Directive::CloseGroup]
}

fn clone_of(index: i64) -> Directive {
    Directive::Clone(ImageSelection::index(index))
}

#[cfg(test)]
mod tests {
    use strum::VariantArray;

    use super::*;

    #[derive(Default)]
    struct Queue {
        supported: bool,
        directives: Vec<Directive>,
    }

    impl Queue {
        fn supported() -> Self {
            Self {
                supported: true,
                ..Default::default()
            }
        }

        fn tokens(&self) -> String {
            self.directives
                .iter()
                .map(Directive::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        }
    }

    impl DirectiveQueue for Queue {
        fn supports_directives(&self) -> bool {
            self.supported
        }

        fn push_directive(&mut self, directive: Directive) {
            self.directives.push(directive);
        }
    }

    fn tokens_for(direction: &str) -> String {
        let mut queue = Queue::supported();
        queue.mirrorize(direction);
        queue.tokens()
    }

    #[test]
    fn test_cardinal_templates() {
        assert_eq!(
            tokens_for("north"),
            "-gravity NorthWest -crop 100%x50%+0+0 +repage ( +clone -flip ) -append -gravity NorthWest"
        );
        assert_eq!(
            tokens_for("south"),
            "-gravity South -crop 100%x50%+0+0 +repage ( +clone -flip ) +swap -append -gravity NorthWest"
        );
        assert_eq!(
            tokens_for("west"),
            "-gravity NorthWest -crop 50%x100%+0+0 +repage ( +clone -flop ) +append -gravity NorthWest"
        );
        assert_eq!(
            tokens_for("east"),
            "-gravity East -crop 50%x100%+0+0 +repage ( +clone -flop ) +swap +append -gravity NorthWest"
        );
    }

    #[test]
    fn test_diagonal_templates() {
        let reflections = "( -clone 0 -flop ) ( -clone 0 -flip ) ( -clone 0 -rotate 180 )";
        let cases = [
            ("northwest", "NorthWest", "0 -clone 1", "2 -clone 3"),
            ("northeast", "NorthEast", "1 -clone 0", "3 -clone 2"),
            ("southwest", "SouthWest", "2 -clone 3", "0 -clone 1"),
            ("southeast", "SouthEast", "3 -clone 2", "1 -clone 0"),
        ];
        for (direction, gravity, top, bottom) in cases {
            let expected = format!(
                "-gravity {gravity} -crop 50%x50%+0+0 +repage {reflections} \
                 ( -clone {top} +append ) ( -clone {bottom} +append ) \
                 -delete 0-3 -append -gravity NorthWest"
            );
            assert_eq!(tokens_for(direction), expected, "{direction}");
        }
    }

    #[test]
    fn test_missing_direction_is_west() {
        let mut queue = Queue::supported();
        queue.mirrorize(None);
        assert_eq!(queue.tokens(), tokens_for("west"));
        assert_eq!(tokens_for(""), tokens_for("west"));
    }

    #[test]
    fn test_direction_is_case_insensitive() {
        assert_eq!(tokens_for("SouthEast"), tokens_for("southeast"));
        assert_eq!(tokens_for("NORTH"), tokens_for("north"));
    }

    #[test]
    fn test_unknown_direction_queues_nothing() {
        let mut queue = Queue::supported();
        queue.mirrorize("west").mirrorize("upwards");
        assert_eq!(queue.tokens(), tokens_for("west"));
    }

    #[test]
    fn test_try_mirrorize_rejects_unknown_direction() {
        let mut queue = Queue::supported();
        assert!(queue.try_mirrorize("sideways").is_err());
        assert!(queue.directives.is_empty());
        queue.try_mirrorize("North").unwrap();
        assert_eq!(queue.tokens(), tokens_for("north"));
    }

    #[test]
    fn test_unsupported_backend_is_untouched() {
        let mut queue = Queue {
            supported: false,
            directives: vec![Directive::Flip],
        };
        queue
            .mirrorize("north")
            .mirrorize_towards(Direction::SouthEast);
        assert_eq!(queue.directives, vec![Directive::Flip]);
    }

    #[test]
    fn test_unsupported_backend_ignores_every_input() {
        let mut inputs = vec![None, Some(""), Some("bogus"), Some("   ")];
        inputs.extend(
            Direction::VARIANTS
                .iter()
                .map(|direction| Some(<&'static str>::from(direction))),
        );
        for input in inputs {
            let mut queue = Queue::default();
            queue.mirrorize(input);
            assert!(queue.directives.is_empty(), "{input:?}");
            if let Some(input) = input {
                assert!(queue.try_mirrorize(input).is_ok(), "{input:?}");
                assert!(queue.directives.is_empty(), "{input:?}");
            }
        }
    }

    #[test]
    fn test_padded_direction_queues_nothing() {
        let mut queue = Queue::supported();
        queue.mirrorize("   ").mirrorize(" north ");
        assert!(queue.directives.is_empty());
        assert!(queue.try_mirrorize(" north ").is_err());
    }

    #[test]
    fn test_default_twice_is_west_twice() {
        let mut defaulted = Queue::supported();
        defaulted.mirrorize(None).mirrorize(None);
        let mut west = Queue::supported();
        west.mirrorize("west").mirrorize("west");
        assert_eq!(defaulted.directives, west.directives);
    }

    #[test]
    fn test_appends_after_existing_directives() {
        let mut queue = Queue::supported();
        queue.push_directive(Directive::Flop);
        queue.mirrorize("east");
        assert_eq!(queue.directives[0], Directive::Flop);
        assert_eq!(queue.directives.len(), 1 + template(Direction::East).len());
    }

    #[test]
    fn test_template_shape() {
        for &direction in Direction::VARIANTS {
            let directives = template(direction);
            assert!(matches!(directives.first(), Some(Directive::Gravity(_))));
            assert_eq!(
                directives.last(),
                Some(&Directive::Gravity(Gravity::NorthWest))
            );
            for pair in directives.windows(2) {
                if let Directive::Crop(_) = pair[0] {
                    assert_eq!(pair[1], Directive::Repage);
                }
            }
            let opened = directives
                .iter()
                .filter(|d| **d == Directive::OpenGroup)
                .count();
            let closed = directives
                .iter()
                .filter(|d| **d == Directive::CloseGroup)
                .count();
            assert_eq!(opened, closed);
        }
    }

    #[quickcheck_macros::quickcheck]
    fn mirrorize_twice_appends_twice(direction: Direction) -> bool {
        let mut queue = Queue::supported();
        queue.mirrorize_towards(direction).mirrorize_towards(direction);
        let single = template(direction);
        queue.directives.len() == 2 * single.len()
            && queue.directives[single.len()..] == single[..]
    }
}
