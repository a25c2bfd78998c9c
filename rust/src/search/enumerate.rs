//! Fixed-size team enumeration.

/// Iterator over every `team_size`-subset of a pool, in lexicographic order of pool positions.
///
/// Each team lists its members in ascending pool order, so two teams with the same members
/// are always equal as vectors.
pub struct TeamEnumerator<'a> {
    pool: &'a [usize],
    /// Positions into `pool` of the next team to yield; `None` once exhausted.
    positions: Option<Vec<usize>>,
}

impl<'a> TeamEnumerator<'a> {
    pub fn new(pool: &'a [usize], team_size: usize) -> Self {
        let positions = (team_size <= pool.len()).then(|| (0..team_size).collect());
        Self { pool, positions }
    }

    /// Step `positions` to the next combination, or report exhaustion.
    fn advance(positions: &mut [usize], n: usize) -> bool {
        let k = positions.len();
        // Rightmost position that can still move right
        let Some(i) = (0..k).rev().find(|&i| positions[i] < n - k + i) else {
            return false;
        };
        positions[i] += 1;
        for j in i + 1..k {
            positions[j] = positions[j - 1] + 1;
        }
        true
    }
}

impl Iterator for TeamEnumerator<'_> {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        let positions = self.positions.as_mut()?;
        let team = positions.iter().map(|&p| self.pool[p]).collect();
        if !Self::advance(positions, self.pool.len()) {
            self.positions = None;
        }
        Some(team)
    }
}
