//! Joint probability grid over final scores, indexed by `(home goals, away goals)`.
//!
//! Goals are enumerated `0..=MAX_GOALS` for each side. Mass beyond five goals a side is treated as
//! negligible and is not represented.

use std::ops::{Index, IndexMut};

use crate::domain::{Score, Side};
use crate::factorial::{Factorial, Lookup};
use crate::poisson;

pub const MAX_GOALS: usize = 5;
const DIM: usize = MAX_GOALS + 1;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScoreGrid {
    cells: [[f64; DIM]; DIM],
}
impl ScoreGrid {
    /// Grid of independent Poisson goal counts with the given expectancies.
    pub fn univariate_poisson(home_rate: f64, away_rate: f64) -> Self {
        let factorial = Lookup::default();
        Self::from_marginals(
            &marginal(home_rate, &factorial),
            &marginal(away_rate, &factorial),
        )
    }

    pub fn from_marginals(home: &[f64; DIM], away: &[f64; DIM]) -> Self {
        let mut grid = Self::default();
        for (home_goals, &home_prob) in home.iter().enumerate() {
            for (away_goals, &away_prob) in away.iter().enumerate() {
                grid[(home_goals, away_goals)] = home_prob * away_prob;
            }
        }
        grid
    }

    pub fn rows(&self) -> usize {
        DIM
    }

    pub fn cols(&self) -> usize {
        DIM
    }

    /// Probability mass retained by the grid.
    pub fn total(&self) -> f64 {
        self.cells.iter().flatten().sum()
    }

    /// The single most probable score. Earlier cells (fewer home goals, then fewer away goals) win
    /// ties.
    pub fn most_likely_score(&self) -> (Score, f64) {
        let mut best = (Score::nil_all(), self[(0, 0)]);
        for row in 0..self.rows() {
            for col in 0..self.cols() {
                let prob = self[(row, col)];
                if prob > best.1 {
                    best = (Score::new(row as u8, col as u8), prob);
                }
            }
        }
        best
    }
}

fn marginal(rate: f64, factorial: &impl Factorial) -> [f64; DIM] {
    let mut probs = [0.0; DIM];
    for (goals, prob) in probs.iter_mut().enumerate() {
        *prob = poisson::univariate(goals as u8, rate, factorial);
    }
    probs
}

impl Index<(usize, usize)> for ScoreGrid {
    type Output = f64;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.cells[row][col]
    }
}

impl IndexMut<(usize, usize)> for ScoreGrid {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        &mut self.cells[row][col]
    }
}

#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum Outcome {
    Win(Side),
    Draw,
    GoalsUnder(u8),
    GoalsOver(u8),
    CorrectScore(Score),
    BothTeamsScore,
}
impl Outcome {
    pub fn gather(&self, scoregrid: &ScoreGrid) -> f64 {
        match self {
            Outcome::Win(side) => Self::gather_win(side, scoregrid),
            Outcome::Draw => Self::gather_draw(scoregrid),
            Outcome::GoalsUnder(goals) => Self::gather_goals_under(*goals, scoregrid),
            Outcome::GoalsOver(goals) => Self::gather_goals_over(*goals, scoregrid),
            Outcome::CorrectScore(score) => Self::gather_correct_score(score, scoregrid),
            Outcome::BothTeamsScore => Self::gather_both_teams_score(scoregrid),
        }
    }

    fn gather_win(side: &Side, scoregrid: &ScoreGrid) -> f64 {
        let mut prob = 0.0;
        match side {
            Side::Home => {
                for row in 1..scoregrid.rows() {
                    for col in 0..row {
                        prob += scoregrid[(row, col)];
                    }
                }
            }
            Side::Away => {
                for col in 1..scoregrid.cols() {
                    for row in 0..col {
                        prob += scoregrid[(row, col)];
                    }
                }
            }
        }
        prob
    }

    fn gather_draw(scoregrid: &ScoreGrid) -> f64 {
        let mut prob = 0.0;
        for index in 0..scoregrid.rows() {
            prob += scoregrid[(index, index)];
        }
        prob
    }

    /// Total goals strictly greater than `goals`; `GoalsOver(2)` is "over 2.5".
    fn gather_goals_over(goals: u8, scoregrid: &ScoreGrid) -> f64 {
        let goals = goals as usize;
        let mut prob = 0.0;
        for row in 0..scoregrid.rows() {
            for col in 0..scoregrid.cols() {
                if row + col > goals {
                    prob += scoregrid[(row, col)];
                }
            }
        }
        prob
    }

    fn gather_goals_under(goals: u8, scoregrid: &ScoreGrid) -> f64 {
        let goals = goals as usize;
        let mut prob = 0.0;
        for row in 0..scoregrid.rows() {
            for col in 0..scoregrid.cols() {
                if row + col < goals {
                    prob += scoregrid[(row, col)];
                }
            }
        }
        prob
    }

    fn gather_correct_score(score: &Score, scoregrid: &ScoreGrid) -> f64 {
        let (row, col) = (score.home as usize, score.away as usize);
        if row < scoregrid.rows() && col < scoregrid.cols() {
            scoregrid[(row, col)]
        } else {
            0.0
        }
    }

    fn gather_both_teams_score(scoregrid: &ScoreGrid) -> f64 {
        let mut prob = 0.0;
        for row in 1..scoregrid.rows() {
            for col in 1..scoregrid.cols() {
                prob += scoregrid[(row, col)];
            }
        }
        prob
    }
}
