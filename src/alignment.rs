//! Edit-distance alignment between the displayed and target character
//! sequences.
//!
//! The alignment decides, per column position, whether the column keeps
//! scrolling in place, a new column is inserted, or an existing column is
//! scrolled out. A modified Levenshtein backtrack produces the action
//! list; equal-length inputs always replace in place because scrolling a
//! column beats shifting the whole string sideways.

use rustc_hash::FxHashSet;

/// Alignment verdict for one column position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnAction {
    /// Keep the column and retarget it in place.
    Same,
    /// Insert a new column at this position.
    Insert,
    /// Scroll the existing column out to the empty glyph.
    Delete,
}

/// Compute the action list transforming `source` into `target`.
///
/// With `supported == None` the whole input is aligned in one pass. With a
/// supported set, the inputs are partitioned into maximal runs where both
/// sides are animatable; characters outside the set never consume the
/// edit-distance matrix and are forced in or out directly. This keeps
/// symbols like currency signs or separators from triggering scroll
/// animations.
///
/// The result holds exactly `len(source)` Delete/Same entries and
/// `len(target)` Insert/Same entries, in left-to-right application order.
#[must_use]
pub fn compute_column_actions(
    source: &[char],
    target: &[char],
    supported: Option<&FxHashSet<char>>,
) -> Vec<ColumnAction> {
    let mut actions = Vec::with_capacity(source.len().max(target.len()));

    let Some(supported) = supported else {
        append_segment_actions(&mut actions, source, target);
        return actions;
    };

    let mut source_index = 0;
    let mut target_index = 0;
    loop {
        let source_done = source_index == source.len();
        let target_done = target_index == target.len();
        if source_done && target_done {
            break;
        }
        if source_done {
            let remaining = target.len() - target_index;
            actions.resize(actions.len() + remaining, ColumnAction::Insert);
            break;
        }
        if target_done {
            let remaining = source.len() - source_index;
            actions.resize(actions.len() + remaining, ColumnAction::Delete);
            break;
        }

        let source_supported = supported.contains(&source[source_index]);
        let target_supported = supported.contains(&target[target_index]);
        if source_supported && target_supported {
            // Maximal run where both sides can animate.
            let source_end =
                next_unsupported(source, source_index + 1, supported);
            let target_end =
                next_unsupported(target, target_index + 1, supported);
            append_segment_actions(
                &mut actions,
                &source[source_index..source_end],
                &target[target_index..target_end],
            );
            source_index = source_end;
            target_index = target_end;
        } else if source_supported {
            // Target character outside the set comes in as a new column.
            actions.push(ColumnAction::Insert);
            target_index += 1;
        } else if target_supported {
            // Source character outside the set is scrolled out.
            actions.push(ColumnAction::Delete);
            source_index += 1;
        } else {
            // Neither side animates: replace in place.
            actions.push(ColumnAction::Same);
            source_index += 1;
            target_index += 1;
        }
    }

    actions
}

/// First index at or after `start` whose character is outside `supported`,
/// or the slice length if there is none.
fn next_unsupported(
    chars: &[char],
    start: usize,
    supported: &FxHashSet<char>,
) -> usize {
    chars[start..]
        .iter()
        .position(|c| !supported.contains(c))
        .map_or(chars.len(), |i| start + i)
}

/// Append the actions for one fully-animatable segment.
///
/// Equal-length segments short-circuit to all [`ColumnAction::Same`], even
/// when an insert/delete path would be cheaper, so every column updates in
/// place instead of the string visually shifting.
fn append_segment_actions(
    actions: &mut Vec<ColumnAction>,
    source: &[char],
    target: &[char],
) {
    if source.len() == target.len() {
        actions.resize(actions.len() + source.len(), ColumnAction::Same);
        return;
    }

    let rows = source.len() + 1;
    let cols = target.len() + 1;

    let mut matrix = vec![vec![0usize; cols]; rows];
    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..cols {
        matrix[0][j] = j;
    }
    for row in 1..rows {
        for col in 1..cols {
            let cost = usize::from(source[row - 1] != target[col - 1]);
            matrix[row][col] = (matrix[row - 1][col] + 1)
                .min(matrix[row][col - 1] + 1)
                .min(matrix[row - 1][col - 1] + cost);
        }
    }

    // Reverse trace the matrix to recover the action path.
    let mut trail = Vec::with_capacity(rows + cols);
    let mut row = rows - 1;
    let mut col = cols - 1;
    while row > 0 || col > 0 {
        if row == 0 {
            // Top row: only a left move (insert) is legal.
            trail.push(ColumnAction::Insert);
            col -= 1;
        } else if col == 0 {
            // Left column: only an up move (delete) is legal.
            trail.push(ColumnAction::Delete);
            row -= 1;
        } else {
            let insert = matrix[row][col - 1];
            let delete = matrix[row - 1][col];
            let replace = matrix[row - 1][col - 1];

            if insert < delete && insert < replace {
                trail.push(ColumnAction::Insert);
                col -= 1;
            } else if delete < replace {
                trail.push(ColumnAction::Delete);
                row -= 1;
            } else {
                trail.push(ColumnAction::Same);
                row -= 1;
                col -= 1;
            }
        }
    }

    actions.extend(trail.into_iter().rev());
}
