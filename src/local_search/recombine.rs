//! Template-driven segment recombination.
//!
//! Every move in this crate cuts one or two routes into a head, a segment
//! and a tail, then reassembles replacement routes from those pieces, some
//! of them reversed. A [`Template`] lists the pieces of each replacement
//! route; an operator supplies the cut positions and its templates, and
//! [`recombine`] tries the templates in order, applying the first one that
//! strictly improves the total cost.

use crate::evaluation::Evaluator;
use crate::models::{Instance, Route, Solution};

/// Which cut route a piece comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    First,
    Second,
}

/// Which part of a cut route a piece is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Span {
    /// `stops[..start]`
    Head,
    /// `stops[start..end]`
    Segment,
    /// `stops[end..]`
    Tail,
}

/// One piece of a replacement route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Piece {
    side: Side,
    span: Span,
    reversed: bool,
}

impl Piece {
    pub(crate) const fn new(side: Side, span: Span) -> Self {
        Self {
            side,
            span,
            reversed: false,
        }
    }

    pub(crate) const fn rev(self) -> Self {
        Self {
            reversed: true,
            ..self
        }
    }
}

pub(crate) const FIRST_HEAD: Piece = Piece::new(Side::First, Span::Head);
pub(crate) const FIRST_SEGMENT: Piece = Piece::new(Side::First, Span::Segment);
pub(crate) const FIRST_TAIL: Piece = Piece::new(Side::First, Span::Tail);
pub(crate) const SECOND_HEAD: Piece = Piece::new(Side::Second, Span::Head);
pub(crate) const SECOND_SEGMENT: Piece = Piece::new(Side::Second, Span::Segment);
pub(crate) const SECOND_TAIL: Piece = Piece::new(Side::Second, Span::Tail);

/// Pieces of the replacement for the first route and, for two-route moves,
/// the replacement for the second. An empty `second` leaves it untouched.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Template {
    pub(crate) first: &'static [Piece],
    pub(crate) second: &'static [Piece],
}

/// A route index and the `[start, end)` range of its segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Cut {
    pub(crate) route: usize,
    pub(crate) start: usize,
    pub(crate) end: usize,
}

impl Cut {
    pub(crate) fn new(route: usize, start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { route, start, end }
    }

    /// A cut with an empty segment at `at`, splitting into head and tail.
    pub(crate) fn at(route: usize, at: usize) -> Self {
        Self::new(route, at, at)
    }

    fn slice<'s>(&self, stops: &'s [usize], span: Span) -> &'s [usize] {
        match span {
            Span::Head => &stops[..self.start],
            Span::Segment => &stops[self.start..self.end],
            Span::Tail => &stops[self.end..],
        }
    }
}

/// Cumulative demand of `stops`: entry `i` is the load of `stops[..i]`.
pub(crate) fn prefix_demands(instance: &Instance, stops: &[usize]) -> Vec<u64> {
    let mut prefix = Vec::with_capacity(stops.len() + 1);
    let mut load = 0;
    prefix.push(load);
    for &c in stops {
        load += u64::from(instance.customer(c).demand());
        prefix.push(load);
    }
    prefix
}

/// An applied recombination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Applied {
    pub(crate) template: usize,
    pub(crate) delta: f64,
}

fn assemble(
    pieces: &[Piece],
    first: (&Cut, &[usize]),
    second: Option<(&Cut, &[usize])>,
) -> Vec<usize> {
    let mut stops = Vec::with_capacity(first.1.len() + second.map_or(0, |s| s.1.len()));
    for piece in pieces {
        let (cut, route) = match (piece.side, second) {
            (Side::First, _) => first,
            (Side::Second, Some(second)) => second,
            (Side::Second, None) => continue,
        };
        let slice = cut.slice(route, piece.span);
        if piece.reversed {
            stops.extend(slice.iter().rev());
        } else {
            stops.extend_from_slice(slice);
        }
    }
    stops
}

/// Tries `templates` in order on the cut routes and applies the first whose
/// cost change is below `-epsilon`.
///
/// Infeasible reassemblies are skipped before any cost comparison. On
/// success both routes are replaced together; otherwise the solution is
/// left untouched.
pub(crate) fn recombine(
    evaluator: &Evaluator<'_>,
    solution: &mut Solution,
    first: Cut,
    second: Option<Cut>,
    templates: &[Template],
    epsilon: f64,
) -> Option<Applied> {
    for (index, template) in templates.iter().enumerate() {
        let (new_first, new_second) = {
            let first_stops = solution.route(first.route).stops();
            let a = (&first, first_stops);
            let b = second.as_ref().map(|cut| (cut, solution.route(cut.route).stops()));
            let new_first = assemble(template.first, a, b);
            let new_second = b.map(|b| assemble(template.second, a, Some(b)));
            (new_first, new_second)
        };

        let replacement_second = second
            .zip(new_second.as_deref())
            .map(|(cut, stops)| (cut.route, stops));
        let Some(delta) = evaluator.delta(solution, (first.route, &new_first), replacement_second)
        else {
            continue;
        };
        if delta.delta >= -epsilon {
            continue;
        }

        solution.replace_route(first.route, Route::from_stops(new_first), delta.first_cost);
        if let (Some(cut), Some(stops), Some(cost)) = (second, new_second, delta.second_cost) {
            solution.replace_route(cut.route, Route::from_stops(stops), cost);
        }
        return Some(Applied {
            template: index,
            delta: delta.delta,
        });
    }
    None
}
