use std::fmt::{self, Display, Formatter};
use std::io;
use std::io::prelude::*;
use std::str::FromStr;

use nom::{
    branch::alt,
    character::complete::{char, digit1, multispace0},
    combinator::{map, map_res},
    sequence::{delimited, separated_pair},
    IResult,
};
use tracing::{event, span, Level};
use tracing_subscriber::prelude::*;

/// Pairs nested at least this deep explode.
const EXPLODE_DEPTH: usize = 4;
/// Regular numbers at least this large split.
const SPLIT_THRESHOLD: u32 = 10;
/// Magnitude weight of the left element of a pair.
const LEFT_WEIGHT: u64 = 3;
/// Magnitude weight of the right element of a pair.
const RIGHT_WEIGHT: u64 = 2;
/// Upper bound on explode/split steps, per leaf of the unreduced number.
const MAX_REDUCTION_STEPS_PER_LEAF: usize = 1000;

/// A snailfish number: either a regular number or a pair of snailfish
/// numbers.  `clone()` is a deep copy; nothing is shared between
/// numbers.
#[derive(Debug, PartialEq, Eq, Clone)]
enum SnailNum {
    Leaf(u32),
    Pair(Box<SnailNum>, Box<SnailNum>),
}

#[derive(Debug, PartialEq, Eq)]
enum SnailError {
    MalformedInput(String, String),
    EmptySequence { needed: usize, got: usize },
    Overflow(String),
    InvariantViolation(String),
}

impl Display for SnailError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SnailError::MalformedInput(s, reason) => {
                write!(f, "'{}' is not a valid snail number: {}", s, reason)
            }
            SnailError::EmptySequence { needed, got } => {
                write!(
                    f,
                    "need at least {} snail numbers but there are only {}",
                    needed, got
                )
            }
            SnailError::Overflow(msg) => {
                write!(f, "arithmetic overflow: {}", msg)
            }
            SnailError::InvariantViolation(msg) => {
                write!(f, "internal error: {}", msg)
            }
        }
    }
}

impl Display for SnailNum {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SnailNum::Leaf(value) => write!(f, "{}", value),
            SnailNum::Pair(left, right) => write!(f, "[{},{}]", left, right),
        }
    }
}

fn leaf_parser(input: &str) -> IResult<&str, SnailNum> {
    map(map_res(digit1, u32::from_str), SnailNum::Leaf)(input)
}

fn element_parser(input: &str) -> IResult<&str, SnailNum> {
    delimited(multispace0, snail_parser, multispace0)(input)
}

fn pair_parser(input: &str) -> IResult<&str, SnailNum> {
    map(
        delimited(
            char('['),
            separated_pair(element_parser, char(','), element_parser),
            char(']'),
        ),
        |(left, right)| SnailNum::Pair(Box::new(left), Box::new(right)),
    )(input)
}

fn snail_parser(input: &str) -> IResult<&str, SnailNum> {
    alt((leaf_parser, pair_parser))(input)
}

impl TryFrom<&str> for SnailNum {
    type Error = SnailError;
    fn try_from(s: &str) -> Result<SnailNum, SnailError> {
        match element_parser(s) {
            Ok(("", n)) => Ok(n),
            Ok((unparsed, _)) => Err(SnailError::MalformedInput(
                s.to_string(),
                format!("unexpected trailing junk: '{}'", unparsed),
            )),
            Err(e) => Err(SnailError::MalformedInput(s.to_string(), e.to_string())),
        }
    }
}

#[test]
fn test_parse_snail_number() {
    assert_eq!(SnailNum::try_from("7"), Ok(SnailNum::Leaf(7)));
    assert_eq!(
        SnailNum::try_from("[1,2]"),
        Ok(SnailNum::Pair(
            Box::new(SnailNum::Leaf(1)),
            Box::new(SnailNum::Leaf(2))
        ))
    );
    // Spacing is tolerated but not preserved.
    assert_eq!(
        SnailNum::try_from(" [ [1, 2] ,3 ]\n").map(|n| n.to_string()),
        Ok("[[1,2],3]".to_string())
    );
}

#[test]
fn test_parse_snail_number_rejects_malformed_input() {
    for s in &[
        "",
        "[]",
        "[1]",
        "[1,2,3]",
        "[[1,2],[3]]",
        "[a,1]",
        "[-1,2]",
        "[1.5,2]",
        "[1,2]]",
        "[1,2] junk",
        "[[1,2],3",
        "[99999999999,1]",
    ] {
        match SnailNum::try_from(*s) {
            Err(SnailError::MalformedInput(input, _)) => {
                assert_eq!(&input, s);
            }
            other => {
                panic!("expected '{}' to be rejected, got {:?}", s, other);
            }
        }
    }
}

#[test]
fn test_display_roundtrips() {
    for s in &[
        "[5,3]",
        "[5,[1,2]]",
        "[[1,2],5]",
        "[[1,2],[3,4]]",
        "[[1,2],[[8,9],4]]",
    ] {
        match SnailNum::try_from(*s) {
            Ok(num) => {
                let formatted = num.to_string();
                assert_eq!(s, &formatted, "failed to round-trip parse/print");
            }
            Err(e) => {
                panic!("failed to parse '{}': {}", s, e);
            }
        }
    }
}

/// Values thrown out of an exploding pair which have not yet landed
/// on a neighbouring regular number.
#[derive(Debug, Default, PartialEq, Eq)]
struct Blast {
    left: Option<u32>,
    right: Option<u32>,
}

impl SnailNum {
    fn is_leaf(&self) -> bool {
        matches!(self, SnailNum::Leaf(_))
    }

    fn leaf_count(&self) -> usize {
        match self {
            SnailNum::Leaf(_) => 1,
            SnailNum::Pair(left, right) => left.leaf_count() + right.leaf_count(),
        }
    }

    fn add_to_leaf(n: &mut u32, value: u32) -> Result<(), SnailError> {
        match n.checked_add(value) {
            Some(total) => {
                *n = total;
                Ok(())
            }
            None => Err(SnailError::Overflow(format!(
                "explode: cannot carry {} onto {}",
                value, n
            ))),
        }
    }

    fn add_to_leftmost(&mut self, value: u32) -> Result<(), SnailError> {
        match self {
            SnailNum::Leaf(n) => SnailNum::add_to_leaf(n, value),
            SnailNum::Pair(left, _) => left.add_to_leftmost(value),
        }
    }

    fn add_to_rightmost(&mut self, value: u32) -> Result<(), SnailError> {
        match self {
            SnailNum::Leaf(n) => SnailNum::add_to_leaf(n, value),
            SnailNum::Pair(_, right) => right.add_to_rightmost(value),
        }
    }

    fn regular_pair_values(&self) -> Option<(u32, u32)> {
        match self {
            SnailNum::Pair(left, right) => match (left.as_ref(), right.as_ref()) {
                (SnailNum::Leaf(l), SnailNum::Leaf(r)) => Some((*l, *r)),
                _ => None,
            },
            SnailNum::Leaf(_) => None,
        }
    }

    /// Explode the leftmost pair of regular numbers nested at least
    /// `EXPLODE_DEPTH` deep, where `self` sits at `depth`.  The
    /// returned blast holds whatever could not be delivered to a
    /// neighbour within `self`.
    fn explode_below(&mut self, depth: usize) -> Result<Option<Blast>, SnailError> {
        if self.is_leaf() {
            return Ok(None);
        }
        if depth >= EXPLODE_DEPTH {
            if let Some((left, right)) = self.regular_pair_values() {
                *self = SnailNum::Leaf(0);
                return Ok(Some(Blast {
                    left: Some(left),
                    right: Some(right),
                }));
            }
        }
        if let SnailNum::Pair(left, right) = self {
            if let Some(mut blast) = left.explode_below(depth + 1)? {
                if let Some(carry) = blast.right.take() {
                    right.add_to_leftmost(carry)?;
                }
                return Ok(Some(blast));
            }
            if let Some(mut blast) = right.explode_below(depth + 1)? {
                if let Some(carry) = blast.left.take() {
                    left.add_to_rightmost(carry)?;
                }
                return Ok(Some(blast));
            }
        }
        Ok(None)
    }

    fn explode(&mut self) -> Result<bool, SnailError> {
        match self.explode_below(0)? {
            Some(leftover) => {
                if leftover != Blast::default() {
                    event!(
                        Level::TRACE,
                        "explode: no neighbour for {:?}, dropping it",
                        leftover
                    );
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn split(&mut self) -> bool {
        if let SnailNum::Leaf(value) = *self {
            if value < SPLIT_THRESHOLD {
                return false;
            }
            let left = value / 2;
            let right = value - left;
            *self = SnailNum::Pair(
                Box::new(SnailNum::Leaf(left)),
                Box::new(SnailNum::Leaf(right)),
            );
            return true;
        }
        match self {
            SnailNum::Pair(left, right) => left.split() || right.split(),
            SnailNum::Leaf(_) => false,
        }
    }

    /// Apply explode and split until neither applies, giving up after
    /// `limit` steps.  Returns the number of steps taken.
    fn reduce_with_limit(&mut self, limit: usize) -> Result<usize, SnailError> {
        let mut steps: usize = 0;
        loop {
            if self.explode()? {
                event!(Level::TRACE, "after explode: {}", self);
            } else if self.split() {
                event!(Level::TRACE, "after split: {}", self);
            } else {
                return Ok(steps);
            }
            steps += 1;
            if steps > limit {
                return Err(SnailError::InvariantViolation(format!(
                    "reduction did not finish within {} steps; stopped at {}",
                    limit, self
                )));
            }
        }
    }

    fn reduce(&mut self) -> Result<usize, SnailError> {
        let limit = MAX_REDUCTION_STEPS_PER_LEAF * self.leaf_count();
        self.reduce_with_limit(limit)
    }

    fn magnitude(&self) -> Result<u64, SnailError> {
        match self {
            SnailNum::Leaf(value) => Ok(u64::from(*value)),
            SnailNum::Pair(left, right) => {
                let l = left.magnitude()?;
                let r = right.magnitude()?;
                match (l.checked_mul(LEFT_WEIGHT), r.checked_mul(RIGHT_WEIGHT)) {
                    (None, _) => Err(SnailError::Overflow(format!(
                        "magnitude: {}*{}",
                        l, LEFT_WEIGHT
                    ))),
                    (_, None) => Err(SnailError::Overflow(format!(
                        "magnitude: {}*{}",
                        r, RIGHT_WEIGHT
                    ))),
                    (Some(l), Some(r)) => l.checked_add(r).ok_or_else(|| {
                        SnailError::Overflow(format!("magnitude: {} + {}", l, r))
                    }),
                }
            }
        }
    }
}

/// Add two snailfish numbers.  Neither operand is modified.
fn add(left: &SnailNum, right: &SnailNum) -> Result<SnailNum, SnailError> {
    let mut sum = SnailNum::Pair(Box::new(left.clone()), Box::new(right.clone()));
    let steps = sum.reduce()?;
    event!(
        Level::DEBUG,
        "{} + {} = {} after {} reduction steps",
        left,
        right,
        sum,
        steps
    );
    Ok(sum)
}

/// Add `item` to a running total.  There is no snailfish zero, so an
/// empty total (`None`) acts as the identity.
fn accumulate(total: Option<SnailNum>, item: &SnailNum) -> Result<SnailNum, SnailError> {
    match total {
        None => Ok(item.clone()),
        Some(total) => add(&total, item),
    }
}

fn sum_sequence(nums: &[SnailNum]) -> Result<SnailNum, SnailError> {
    let mut total: Option<SnailNum> = None;
    for n in nums {
        total = Some(accumulate(total, n)?);
    }
    total.ok_or(SnailError::EmptySequence { needed: 1, got: 0 })
}

/// Largest magnitude of `a + b` over every ordered pair of distinct
/// positions.
fn max_pairwise_magnitude(nums: &[SnailNum]) -> Result<u64, SnailError> {
    if nums.len() < 2 {
        return Err(SnailError::EmptySequence {
            needed: 2,
            got: nums.len(),
        });
    }
    let span = span!(Level::INFO, "pairwise search", count = nums.len());
    let _enter = span.enter();
    let mut best: u64 = 0;
    for (i, left) in nums.iter().enumerate() {
        for (j, right) in nums.iter().enumerate() {
            if i != j {
                let m = add(left, right)?.magnitude()?;
                if m > best {
                    event!(
                        Level::DEBUG,
                        "numbers {} and {} give magnitude {}, beating {}",
                        i,
                        j,
                        m,
                        best
                    );
                    best = m;
                }
            }
        }
    }
    Ok(best)
}

#[cfg(test)]
fn snail(s: &str) -> SnailNum {
    SnailNum::try_from(s).expect("test input should be valid")
}

#[cfg(test)]
fn snails(items: &[&str]) -> Vec<SnailNum> {
    items.iter().map(|s| snail(s)).collect()
}

#[cfg(test)]
fn explode_str(s: &str) -> (String, bool) {
    let mut n = snail(s);
    let exploded = n.explode().expect("explode should not overflow");
    (n.to_string(), exploded)
}

#[cfg(test)]
fn split_str(s: &str) -> (String, bool) {
    let mut n = snail(s);
    let changed = n.split();
    (n.to_string(), changed)
}

#[cfg(test)]
const HOMEWORK: &str = concat!(
    "[[[0,[5,8]],[[1,7],[9,6]]],[[4,[1,2]],[[1,4],2]]]\n",
    "[[[5,[2,8]],4],[5,[[9,9],0]]]\n",
    "[6,[[[6,2],[5,6]],[[7,6],[4,7]]]]\n",
    "[[[6,[0,7]],[0,9]],[4,[9,[9,0]]]]\n",
    "[[[7,[6,4]],[3,[1,3]]],[[[5,5],1],9]]\n",
    "[[6,[[7,3],[3,2]]],[[[3,8],[5,7]],4]]\n",
    "[[[[5,4],[7,7]],8],[[8,3],8]]\n",
    "[[9,3],[[9,9],[6,[4,9]]]]\n",
    "[[2,[[7,7],7]],[[5,8],[[9,3],[0,2]]]]\n",
    "[[[[5,2],5],[8,[3,7]]],[[5,[7,5]],[4,4]]]\n",
);

#[test]
fn test_is_leaf() {
    assert!(SnailNum::Leaf(3).is_leaf());
    assert!(!snail("[3,4]").is_leaf());
}

#[test]
fn test_explode() {
    assert_eq!(explode_str("[1,2]"), ("[1,2]".to_string(), false));
    assert_eq!(
        explode_str("[[[[1,2],3],4],5]"),
        ("[[[[1,2],3],4],5]".to_string(), false)
    );
    // Nothing to the left of [9,8], so the 9 is dropped.
    assert_eq!(
        explode_str("[[[[[9,8],1],2],3],4]"),
        ("[[[[0,9],2],3],4]".to_string(), true)
    );
    // Nothing to the right of [3,2], so the 2 is dropped.
    assert_eq!(
        explode_str("[7,[6,[5,[4,[3,2]]]]]"),
        ("[7,[6,[5,[7,0]]]]".to_string(), true)
    );
    assert_eq!(
        explode_str("[[6,[5,[4,[3,2]]]],1]"),
        ("[[6,[5,[7,0]]],3]".to_string(), true)
    );
    // Only the leftmost candidate explodes.
    assert_eq!(
        explode_str("[[3,[2,[1,[7,3]]]],[6,[5,[4,[3,2]]]]]"),
        ("[[3,[2,[8,0]]],[9,[5,[4,[3,2]]]]]".to_string(), true)
    );
    assert_eq!(
        explode_str("[[3,[2,[8,0]]],[9,[5,[4,[3,2]]]]]"),
        ("[[3,[2,[8,0]]],[9,[5,[7,0]]]]".to_string(), true)
    );
}

#[test]
fn test_explode_carries_large_values() {
    assert_eq!(
        explode_str("[[[[12,12],[6,14]],[[15,0],[17,[8,1]]]],[2,9]]"),
        ("[[[[12,12],[6,14]],[[15,0],[25,0]]],[3,9]]".to_string(), true)
    );
}

#[test]
fn test_explode_deeper_than_threshold() {
    // A pair at depth 4 whose children are not both regular numbers
    // does not explode itself; its leftmost regular pair does.
    assert_eq!(
        explode_str("[[[[[[1,2],3],4],5],6],7]"),
        ("[[[[[0,5],4],5],6],7]".to_string(), true)
    );
}

#[test]
fn test_split() {
    assert_eq!(split_str("[9,6]"), ("[9,6]".to_string(), false));
    assert_eq!(split_str("[10,6]"), ("[[5,5],6]".to_string(), true));
    assert_eq!(split_str("[11,6]"), ("[[5,6],6]".to_string(), true));
    assert_eq!(split_str("[12,6]"), ("[[6,6],6]".to_string(), true));
    // Verify that we pass through stuff on the left that doesn't need
    // splitting.
    assert_eq!(
        split_str("[[1,2],[10,6]]"),
        ("[[1,2],[[5,5],6]]".to_string(), true)
    );
    // Verify that we always split the leftmost number.
    assert_eq!(split_str("[12,16]"), ("[[6,6],16]".to_string(), true));
}

#[test]
fn test_reduce() {
    let mut n = snail("[[[[[4,3],4],4],[7,[[8,4],9]]],[1,1]]");
    assert_eq!(n.reduce(), Ok(5));
    assert_eq!(n, snail("[[[[0,7],4],[[7,8],[6,0]]],[8,1]]"));
}

#[test]
fn test_reduce_is_idempotent() {
    for s in &[
        "[1,2]",
        "[[[[0,7],4],[[7,8],[6,0]]],[8,1]]",
        "[[[[6,6],[7,6]],[[7,7],[7,0]]],[[[7,7],[7,7]],[[7,8],[9,9]]]]",
    ] {
        let mut n = snail(s);
        assert_eq!(n.reduce(), Ok(0));
        assert_eq!(n.to_string(), *s);
    }
}

#[test]
fn test_reduce_gives_up() {
    let mut n = snail("[[[[[4,3],4],4],[7,[[8,4],9]]],[1,1]]");
    match n.reduce_with_limit(2) {
        Err(SnailError::InvariantViolation(_)) => (),
        other => panic!("expected reduction to give up, got {:?}", other),
    }
    let mut n = snail("[[[[[4,3],4],4],[7,[[8,4],9]]],[1,1]]");
    assert_eq!(n.reduce_with_limit(5), Ok(5));
}

#[test]
fn test_explode_carry_overflow() {
    // The right carry lands on a leaf already at u32::MAX.
    let mut n = snail("[[[[[1,1],4294967295],0],0],0]");
    match n.reduce() {
        Err(SnailError::Overflow(_)) => (),
        other => panic!("expected carry to overflow, got {:?}", other),
    }
    // Here it is the left carry, delivered across the root.
    match add(&snail("[1,1]"), &snail("[[[[4294967295,0],0],0],0]")) {
        Err(SnailError::Overflow(_)) => (),
        other => panic!("expected carry to overflow, got {:?}", other),
    }
}

#[test]
fn test_add() {
    let left = snail("[[[[4,3],4],4],[7,[[8,4],9]]]");
    let right = snail("[1,1]");
    assert_eq!(
        add(&left, &right),
        Ok(snail("[[[[0,7],4],[[7,8],[6,0]]],[8,1]]"))
    );
}

#[test]
fn test_add_leaves_operands_alone() {
    let left = snail("[[[[4,3],4],4],[7,[[8,4],9]]]");
    let right = snail("[1,1]");
    let (left_before, right_before) = (left.clone(), right.clone());
    add(&left, &right).expect("addition should succeed");
    assert_eq!(left, left_before);
    assert_eq!(right, right_before);
    // The same operands can be added again, in either order.
    assert!(add(&right, &left).is_ok());
    assert_eq!(left.to_string(), "[[[[4,3],4],4],[7,[[8,4],9]]]");
}

#[test]
fn test_copy_is_independent() {
    let original = snail("[[[[[9,8],1],2],3],4]");
    let mut copy = original.clone();
    assert_eq!(copy.reduce(), Ok(1));
    assert_eq!(original.to_string(), "[[[[[9,8],1],2],3],4]");
    assert_eq!(copy.to_string(), "[[[[0,9],2],3],4]");
}

#[test]
fn test_add_larger_example() {
    assert_eq!(
        add(
            &snail("[[[0,[4,5]],[0,0]],[[[4,5],[2,6]],[9,5]]]"),
            &snail("[7,[[[3,7],[4,3]],[[6,3],[8,8]]]]")
        ),
        Ok(snail(
            "[[[[4,0],[5,4]],[[7,7],[6,0]]],[[8,[7,7]],[[7,9],[5,0]]]]"
        ))
    );
    assert_eq!(
        add(
            &snail("[[[[6,6],[6,6]],[[6,0],[6,7]]],[[[7,7],[8,9]],[8,[8,1]]]]"),
            &snail("[2,9]")
        ),
        Ok(snail("[[[[6,6],[7,7]],[[0,7],[7,7]]],[[[5,5],[5,6]],9]]"))
    );
}

#[test]
fn test_sum_sequence_sample() {
    assert_eq!(
        sum_sequence(&snails(&["[1,1]", "[2,2]", "[3,3]", "[4,4]"])),
        Ok(snail("[[[[1,1],[2,2]],[3,3]],[4,4]]"))
    );
    assert_eq!(
        sum_sequence(&snails(&["[1,1]", "[2,2]", "[3,3]", "[4,4]", "[5,5]"])),
        Ok(snail("[[[[3,0],[5,3]],[4,4]],[5,5]]"))
    );
    assert_eq!(
        sum_sequence(&snails(&[
            "[1,1]", "[2,2]", "[3,3]", "[4,4]", "[5,5]", "[6,6]"
        ])),
        Ok(snail("[[[[5,0],[7,4]],[5,5]],[6,6]]"))
    );
}

#[test]
fn test_sum_sequence_single_item() {
    assert_eq!(sum_sequence(&snails(&["[[1,2],3]"])), Ok(snail("[[1,2],3]")));
}

#[test]
fn test_sum_sequence_large_example() {
    assert_eq!(
        sum_sequence(&snails(&[
            "[[[0,[4,5]],[0,0]],[[[4,5],[2,6]],[9,5]]]",
            "[7,[[[3,7],[4,3]],[[6,3],[8,8]]]]",
            "[[2,[[0,8],[3,4]]],[[[6,7],1],[7,[1,6]]]]",
            "[[[[2,4],7],[6,[0,5]]],[[[6,8],[2,8]],[[2,1],[4,5]]]]",
            "[7,[5,[[3,8],[1,4]]]]",
            "[[2,[2,2]],[8,[8,1]]]",
            "[2,9]",
            "[1,[[[9,3],9],[[9,0],[0,7]]]]",
            "[[[5,[7,4]],7],1]",
            "[[[[4,2],2],6],[8,7]]",
        ])),
        Ok(snail(
            "[[[[8,7],[7,7]],[[8,6],[7,7]]],[[[0,7],[6,6]],[8,7]]]"
        ))
    );
}

#[test]
fn test_sum_sequence_empty() {
    assert_eq!(
        sum_sequence(&[]),
        Err(SnailError::EmptySequence { needed: 1, got: 0 })
    );
}

#[test]
fn test_magnitude() {
    assert_eq!(SnailNum::Leaf(7).magnitude(), Ok(7));
    assert_eq!(snail("[9,1]").magnitude(), Ok(29));
    assert_eq!(snail("[1,9]").magnitude(), Ok(21));
    assert_eq!(snail("[[9,1],[1,9]]").magnitude(), Ok(129));
    assert_eq!(snail("[[1,2],[[3,4],5]]").magnitude(), Ok(143));
    assert_eq!(
        snail("[[[[8,7],[7,7]],[[8,6],[7,7]]],[[[0,7],[6,6]],[8,7]]]").magnitude(),
        Ok(3488)
    );
}

#[test]
fn test_magnitude_overflow() {
    let nest = |levels: usize| -> SnailNum {
        let mut n = SnailNum::Leaf(1);
        for _ in 0..levels {
            n = SnailNum::Pair(Box::new(n), Box::new(SnailNum::Leaf(0)));
        }
        n
    };
    assert_eq!(nest(40).magnitude(), Ok(3u64.pow(40)));
    match nest(45).magnitude() {
        Err(SnailError::Overflow(_)) => (),
        other => panic!("expected magnitude to overflow, got {:?}", other),
    }
}

#[test]
fn test_final_part1_example() {
    let nums = parse_homework(HOMEWORK).expect("homework should be valid");
    let sum = sum_sequence(&nums).expect("homework should have a sum");
    assert_eq!(
        sum,
        snail("[[[[6,6],[7,6]],[[7,7],[7,0]]],[[[7,7],[7,7]],[[7,8],[9,9]]]]")
    );
    assert_eq!(sum.magnitude(), Ok(4140));
}

#[test]
fn test_final_part2_example() {
    let nums = parse_homework(HOMEWORK).expect("homework should be valid");
    assert_eq!(max_pairwise_magnitude(&nums), Ok(3993));
    // The search must not have disturbed its inputs.
    assert_eq!(nums, parse_homework(HOMEWORK).expect("homework should be valid"));
}

#[test]
fn test_max_pairwise_magnitude_considers_both_orders() {
    let (a, b) = (snail("[1,1]"), snail("[2,2]"));
    let ab = add(&a, &b).expect("addition should succeed");
    let ba = add(&b, &a).expect("addition should succeed");
    assert_eq!(ab.magnitude(), Ok(35));
    assert_eq!(ba.magnitude(), Ok(40));
    assert_eq!(
        max_pairwise_magnitude(&snails(&["[1,1]", "[2,2]"])),
        Ok(40)
    );
}

#[test]
fn test_max_pairwise_magnitude_too_few() {
    assert_eq!(
        max_pairwise_magnitude(&[]),
        Err(SnailError::EmptySequence { needed: 2, got: 0 })
    );
    assert_eq!(
        max_pairwise_magnitude(&snails(&["[1,1]"])),
        Err(SnailError::EmptySequence { needed: 2, got: 1 })
    );
}

#[test]
fn test_parse_homework() {
    let nums = parse_homework("[1,1]\n\n[2,2]\n").expect("should be valid");
    assert_eq!(nums, snails(&["[1,1]", "[2,2]"]));
    match parse_homework("[1,1]\n[2,2,2]\n") {
        Err(e) => assert!(e.starts_with("line 2: "), "unexpected error {}", e),
        Ok(nums) => panic!("expected a parse failure, got {:?}", nums),
    }
}

fn parse_homework(input: &str) -> Result<Vec<SnailNum>, String> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| SnailNum::try_from(line).map_err(|e| format!("line {}: {}", i + 1, e)))
        .collect()
}

fn part1(nums: &[SnailNum]) -> Result<(), SnailError> {
    let sum = sum_sequence(nums)?;
    println!("Day 18 part 1: {}", sum.magnitude()?);
    Ok(())
}

fn part2(nums: &[SnailNum]) -> Result<(), SnailError> {
    println!("Day 18 part 2: {}", max_pairwise_magnitude(nums)?);
    Ok(())
}

fn run() -> Result<(), String> {
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);
    let filter_layer = match tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info"))
    {
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
        Ok(layer) => layer,
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    let mut input = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut input) {
        return Err(format!("failed to read input: {}", e));
    }
    let snail_numbers = parse_homework(&input)?;
    println!(
        "There are {} snail numbers in the input.",
        snail_numbers.len()
    );
    part1(&snail_numbers).map_err(|e| e.to_string())?;
    part2(&snail_numbers).map_err(|e| e.to_string())?;
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
