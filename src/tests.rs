use std::collections::HashSet;

use index::NodeIndex;
use node::{Color, Node};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use super::*;

struct IntervalGenerator {
    rng: StdRng,
    unique: HashSet<Span>,
    limit: i64,
}

impl IntervalGenerator {
    fn new(seed: [u8; 32]) -> Self {
        const LIMIT: i64 = 1000;
        Self::with_limit(seed, LIMIT)
    }

    fn with_limit(seed: [u8; 32], limit: i64) -> Self {
        Self {
            rng: SeedableRng::from_seed(seed),
            unique: HashSet::new(),
            limit,
        }
    }

    fn next(&mut self) -> Span {
        let low = self.rng.gen_range(0..self.limit - 1);
        let high = self.rng.gen_range((low + 1)..self.limit);
        Span::new(low, high)
    }

    fn next_unique(&mut self) -> Span {
        let mut interval = self.next();
        while self.unique.contains(&interval) {
            interval = self.next();
        }
        self.unique.insert(interval);
        interval
    }

    fn next_with_range(&mut self, range: i64) -> Span {
        let low = self.rng.gen_range(0..self.limit - 1);
        let high = self
            .rng
            .gen_range((low + 1)..self.limit.min(low + 1 + range));
        Span::new(low, high)
    }
}

fn with_tree_and_generator(test_fn: impl Fn(IntervalTree<Span>, IntervalGenerator)) {
    let seeds = vec![[0; 32], [1; 32], [2; 32]];
    for seed in seeds {
        let gen = IntervalGenerator::new(seed);
        let tree = IntervalTree::new();
        test_fn(tree, gen);
    }
}

/// Linear scan over `all`, sorted by bounds.
fn brute_overlappers(all: &[Span], query: &Span) -> Vec<Span> {
    let mut found: Vec<Span> = all.iter().filter(|i| i.overlaps(query)).copied().collect();
    found.sort();
    found
}

#[test]
fn red_black_tree_properties_is_satisfied() {
    with_tree_and_generator(|mut tree, mut gen| {
        let intervals: Vec<_> = std::iter::repeat_with(|| gen.next_unique())
            .take(1000)
            .collect();
        for (i, interval) in intervals.iter().enumerate() {
            assert!(tree.insert(*interval));
            assert_eq!(tree.len(), i + 1);
            assert_eq!(tree.check_invariants(), Ok(()));
        }
        for (i, interval) in intervals.iter().enumerate() {
            assert_eq!(tree.delete(interval), Some(*interval));
            assert_eq!(tree.len(), intervals.len() - i - 1);
            assert_eq!(tree.check_invariants(), Ok(()));
        }
        assert!(tree.is_empty());
    });
}

#[test]
fn sorted_inserts_and_deletes_keep_invariants() {
    let mut tree = IntervalTree::new();
    for i in 0..500 {
        assert!(tree.insert(Span::new(i, i + 10)));
        assert_eq!(tree.check_invariants(), Ok(()));
    }
    for i in (0..500).rev() {
        assert_eq!(tree.delete(&Span::new(i, i + 10)), Some(Span::new(i, i + 10)));
        assert_eq!(tree.check_invariants(), Ok(()));
    }
    assert!(tree.is_empty());

    for i in (0..500).rev() {
        assert!(tree.insert(Span::new(i, i + 10)));
        assert_eq!(tree.check_invariants(), Ok(()));
    }
    for i in 0..500 {
        assert_eq!(tree.delete(&Span::new(i, i + 10)), Some(Span::new(i, i + 10)));
        assert_eq!(tree.check_invariants(), Ok(()));
    }
    assert!(tree.is_empty());
}

#[test]
fn shuffled_deletes_drain_the_tree() {
    let mut gen = IntervalGenerator::with_limit([7; 32], 100_000);
    let mut tree = IntervalTree::new();
    let mut intervals: Vec<_> = std::iter::repeat_with(|| gen.next_unique())
        .take(5000)
        .collect();
    for (i, interval) in intervals.iter().enumerate() {
        assert!(tree.insert(*interval));
        assert_eq!(tree.len(), i + 1);
        assert_eq!(tree.check_invariants(), Ok(()));
    }
    intervals.shuffle(&mut gen.rng);
    for (i, interval) in intervals.iter().enumerate() {
        assert_eq!(tree.delete(interval), Some(*interval));
        assert_eq!(tree.delete(interval), None);
        assert_eq!(tree.len(), intervals.len() - i - 1);
        assert_eq!(tree.check_invariants(), Ok(()));
    }
    assert!(tree.is_empty());
    assert_eq!(tree.inner.nodes.len(), 1);
}

#[test]
fn empty_tree_reports_absence() {
    let mut tree: IntervalTree<Span> = IntervalTree::new();
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
    assert_eq!(tree.minimum(), None);
    assert_eq!(tree.maximum(), None);
    assert_eq!(tree.successor(&(0..1i64)), None);
    assert_eq!(tree.predecessor(&(0..1i64)), None);
    assert!(!tree.overlaps(&(0..1i64)));
    assert_eq!(tree.num_overlappers(&(0..1i64)), 0);
    assert_eq!(tree.minimum_overlapper(&(0..1i64)), None);
    assert_eq!(tree.overlappers(&(0..1i64)).count(), 0);
    assert_eq!(tree.iter().next(), None);
    assert_eq!(tree.check_invariants(), Ok(()));

    assert_eq!(tree.delete(&(0..1i64)), None);
    assert_eq!(tree.delete_min(), None);
    assert_eq!(tree.delete_max(), None);
    assert!(!tree.delete_overlappers(&(0..1i64)));
}

#[test]
fn singleton_tree_separates_overlap_from_adjacency() {
    let tree = IntervalTree::with_interval(Span::new(0, 10));
    assert!(!tree.is_empty());
    assert_eq!(tree.len(), 1);
    assert!(tree.contains(&Span::new(0, 10)));
    assert!(!tree.contains(&Span::new(1, 9)));
    assert!(tree.overlaps(&Span::new(5, 15)));
    assert!(!tree.overlaps(&Span::new(10, 20)));
    assert!(!tree.overlaps(&Span::new(-5, 0)));
    assert_eq!(tree.successor(&(0..10i64)), None);
    assert_eq!(tree.predecessor(&(0..10i64)), None);
    assert_eq!(tree.minimum(), tree.maximum());
}

#[test]
fn point_tree_traversal() {
    let tree: IntervalTree<Span> = [11, 2, 1, 14, 15, 7, 5, 8, 4]
        .into_iter()
        .map(Span::point)
        .collect();
    assert_eq!(tree.len(), 9);
    assert_eq!(tree.minimum(), Some(&Span::point(1)));
    assert_eq!(tree.maximum(), Some(&Span::point(15)));
    assert_eq!(tree.successor(&Span::point(7)), Some(&Span::point(8)));
    assert_eq!(tree.predecessor(&Span::point(7)), Some(&Span::point(5)));
    assert_eq!(tree.successor(&Span::point(15)), None);
    assert_eq!(tree.predecessor(&Span::point(1)), None);
    assert_eq!(tree.successor(&Span::point(3)), None);
}

#[test]
fn ascending_iteration_visits_everything_once() {
    with_tree_and_generator(|mut tree, mut gen| {
        for _ in 0..1000 {
            let _ignore = tree.insert(gen.next());
        }
        let all: Vec<_> = tree.iter().collect();
        assert_eq!(all.len(), tree.len());
        assert_eq!(tree.iter().len(), tree.len());
        assert!(all.windows(2).all(|w| w[0].cmp_bounds(w[1]).is_lt()));

        let mut visited = Vec::new();
        let mut current = tree.minimum().copied();
        while let Some(interval) = current {
            visited.push(interval);
            current = tree.successor(&interval).copied();
        }
        assert_eq!(visited.iter().collect::<Vec<_>>(), all);

        let mut visited = Vec::new();
        let mut current = tree.maximum().copied();
        while let Some(interval) = current {
            visited.push(interval);
            current = tree.predecessor(&interval).copied();
        }
        visited.reverse();
        assert_eq!(visited.iter().collect::<Vec<_>>(), all);
    });
}

#[test]
fn iterators_stay_exhausted() {
    let tree: IntervalTree<Span> = (0..10).map(|i| Span::new(i, i + 3)).collect();

    let mut iter = tree.iter();
    assert_eq!(iter.by_ref().count(), 10);
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next(), None);

    let mut overlappers = tree.overlappers(&(4..6i64));
    assert_eq!(overlappers.by_ref().count(), 4);
    assert_eq!(overlappers.next(), None);
    assert_eq!(overlappers.next(), None);

    let mut owned = tree.clone().into_iter();
    assert_eq!(owned.by_ref().count(), 10);
    assert_eq!(owned.next(), None);
}

#[test]
fn owning_iteration_is_ascending() {
    with_tree_and_generator(|mut tree, mut gen| {
        tree.extend(std::iter::repeat_with(|| gen.next_unique()).take(300));
        let borrowed: Vec<Span> = tree.iter().copied().collect();
        let owned: Vec<Span> = tree.into_iter().collect();
        assert_eq!(owned, borrowed);
    });
}

#[test]
fn reinsert_leaves_tree_untouched() {
    with_tree_and_generator(|mut tree, mut gen| {
        let intervals: Vec<_> = std::iter::repeat_with(|| gen.next_unique())
            .take(200)
            .collect();
        tree.extend(intervals.iter().copied());
        let shape = |tree: &IntervalTree<Span>| -> Vec<_> {
            tree.inner
                .nodes
                .iter()
                .map(|n| (n.left, n.right, n.parent, n.color, n.max_end))
                .collect()
        };
        let before = shape(&tree);
        for interval in &intervals {
            assert!(!tree.insert(*interval));
        }
        assert_eq!(tree.len(), intervals.len());
        assert_eq!(shape(&tree), before);
    });
}

#[test]
fn delete_min_and_max_drain_in_order() {
    let tree: IntervalTree<Span> = (0..100).map(|i| Span::new(i % 10, 20 + i)).collect();
    let mut expected: Vec<Span> = tree.iter().copied().collect();
    let mut tree = tree;
    let mut from_front = true;
    while !expected.is_empty() {
        if from_front {
            assert_eq!(tree.delete_min(), Some(expected.remove(0)));
        } else {
            assert_eq!(tree.delete_max(), expected.pop());
        }
        from_front = !from_front;
        assert_eq!(tree.len(), expected.len());
        assert_eq!(tree.check_invariants(), Ok(()));
    }
    assert_eq!(tree.delete_min(), None);
}

#[test]
fn overlap_queries_match_linear_scan() {
    with_tree_and_generator(|mut tree, mut gen| {
        let intervals: Vec<_> = std::iter::repeat_with(|| gen.next_unique())
            .take(1000)
            .collect();
        tree.extend(intervals.iter().copied());
        for _ in 0..200 {
            let query = gen.next_with_range(50);
            let expected = brute_overlappers(&intervals, &query);
            assert_eq!(tree.overlaps(&query), !expected.is_empty());
            assert_eq!(tree.num_overlappers(&query), expected.len());
            assert_eq!(tree.minimum_overlapper(&query), expected.first());
            assert_eq!(
                tree.overlappers(&query).copied().collect::<Vec<_>>(),
                expected
            );
        }
    });
}

#[test]
fn sparse_overlap_queries_match_linear_scan() {
    let mut gen = IntervalGenerator::with_limit([3; 32], 1_000_000);
    let intervals: Vec<_> = std::iter::repeat_with(|| gen.next_with_range(100))
        .take(2000)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let tree: IntervalTree<Span> = intervals.iter().copied().collect();
    for _ in 0..500 {
        let query = gen.next_with_range(5000);
        let expected = brute_overlappers(&intervals, &query);
        assert_eq!(tree.overlaps(&query), !expected.is_empty());
        assert_eq!(
            tree.overlappers(&query).copied().collect::<Vec<_>>(),
            expected
        );
    }
}

#[test]
fn delete_overlappers_removes_exactly_the_overlapping_set() {
    with_tree_and_generator(|mut tree, mut gen| {
        let mut intervals: Vec<_> = std::iter::repeat_with(|| gen.next_unique())
            .take(1000)
            .collect();
        tree.extend(intervals.iter().copied());
        for _ in 0..50 {
            let query = gen.next_with_range(100);
            let expected = brute_overlappers(&intervals, &query);
            assert_eq!(tree.delete_overlappers(&query), !expected.is_empty());
            intervals.retain(|i| !i.overlaps(&query));
            assert!(!tree.overlaps(&query));
            assert_eq!(tree.len(), intervals.len());
            assert_eq!(tree.check_invariants(), Ok(()));
        }
        let mut rest = intervals.clone();
        rest.sort();
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), rest);
    });
}

#[test]
fn query_spanning_two_clusters() {
    let mut rng = StdRng::from_seed([5; 32]);
    let mut tree = IntervalTree::new();
    for (low, high) in [(0_i64, 3000_i64), (4000, 7000)] {
        for _ in 0..500 {
            let start = rng.gen_range(low..high - 1);
            let end = rng.gen_range((start + 1)..=high.min(start + 50));
            let _ignore = tree.insert(Span::new(start, end));
        }
    }
    let _ignore = tree.insert(Span::new(2990, 3000));
    let _ignore = tree.insert(Span::new(4000, 4010));

    let query = Span::new(2500, 4500);
    let before: Vec<Span> = tree.iter().copied().collect();
    let found: Vec<Span> = tree.overlappers(&query).copied().collect();
    assert!(found.iter().all(|i| i.end <= 3000 || i.start >= 4000));
    assert!(found.iter().any(|i| i.end <= 3000));
    assert!(found.iter().any(|i| i.start >= 4000));
    assert!(!tree.overlaps(&Span::new(3000, 4000)));
    assert_eq!(found, brute_overlappers(&before, &query));

    assert!(tree.delete_overlappers(&query));
    let rest: Vec<Span> = before.into_iter().filter(|i| !i.overlaps(&query)).collect();
    assert_eq!(tree.iter().copied().collect::<Vec<_>>(), rest);
    assert!(rest.iter().any(|i| i.end <= 2500));
    assert!(rest.iter().any(|i| i.start >= 4500));
    assert_eq!(tree.check_invariants(), Ok(()));
}

/// Keys of the hand-built textbook tree, in arena order. Each key `k` is the
/// point interval [k, k + 1).
const TEXTBOOK_KEYS: [i64; 9] = [11, 2, 1, 14, 15, 7, 5, 8, 4];

fn at(key: i64) -> NodeIndex {
    match TEXTBOOK_KEYS.iter().position(|&k| k == key) {
        Some(i) => NodeIndex::new(i + 1),
        None => NodeIndex::sentinel(),
    }
}

/// The tree right after a plain search-tree insert of 4, before any
/// recoloring: 4 and its parent 5 are both red.
fn textbook_tree() -> IntervalTree<Span> {
    use Color::{Black, Red};
    // key, parent, left, right, color, max end; 0 stands for the sentinel
    let shape = [
        (11, 0, 2, 14, Black, 16),
        (2, 11, 1, 7, Red, 9),
        (1, 2, 0, 0, Black, 2),
        (14, 11, 0, 15, Black, 16),
        (15, 14, 0, 0, Red, 16),
        (7, 2, 5, 8, Black, 9),
        (5, 7, 4, 0, Red, 6),
        (8, 7, 0, 0, Red, 9),
        (4, 5, 0, 0, Red, 5),
    ];
    let mut tree: IntervalTree<Span> = IntervalTree::new();
    for (key, parent, left, right, color, max_end) in shape {
        let mut node = Node::new(key, key + 1, Single::new(Span::point(key)));
        node.parent = at(parent);
        node.left = at(left);
        node.right = at(right);
        node.color = color;
        node.max_end = max_end;
        tree.inner.nodes.push(node);
    }
    tree.inner.root = at(11);
    tree.inner.len = shape.len();
    tree
}

#[test]
fn textbook_tree_is_miscolored_only() {
    let tree = textbook_tree();
    assert!(tree.is_bst());
    assert!(tree.is_balanced());
    assert!(tree.has_consistent_max_ends());
    assert!(!tree.has_valid_red_coloring());
    assert_eq!(
        tree.check_invariants(),
        Err(Violation::RedRed {
            parent: Span::point(5),
            child: Span::point(4),
        })
    );

    assert_eq!(tree.minimum(), Some(&Span::point(1)));
    assert_eq!(tree.maximum(), Some(&Span::point(15)));
    let mut sorted = TEXTBOOK_KEYS;
    sorted.sort_unstable();
    for w in sorted.windows(2) {
        assert_eq!(tree.successor(&Span::point(w[0])), Some(&Span::point(w[1])));
        assert_eq!(tree.predecessor(&Span::point(w[1])), Some(&Span::point(w[0])));
    }
}

#[test]
fn insert_fixup_rebalances_textbook_tree() {
    use Color::{Black, Red};
    let mut tree = textbook_tree();
    tree.inner.insert_fixup(at(4));

    assert_eq!(tree.inner.root, at(7));
    // key, parent, left, right, color
    let expected = [
        (7, 0, 2, 11, Black),
        (2, 7, 1, 5, Red),
        (11, 7, 8, 14, Red),
        (1, 2, 0, 0, Black),
        (5, 2, 4, 0, Black),
        (4, 5, 0, 0, Red),
        (8, 11, 0, 0, Black),
        (14, 11, 0, 15, Black),
        (15, 14, 0, 0, Red),
    ];
    for (key, parent, left, right, color) in expected {
        let node = &tree.inner.nodes[at(key).index()];
        assert_eq!(node.parent, at(parent), "parent of {key}");
        assert_eq!(node.left, at(left), "left child of {key}");
        assert_eq!(node.right, at(right), "right child of {key}");
        assert_eq!(node.color, color, "color of {key}");
    }
    assert_eq!(tree.inner.nodes[at(7).index()].max_end, 16);
    assert_eq!(tree.inner.nodes[at(2).index()].max_end, 6);
    assert_eq!(tree.check_invariants(), Ok(()));
}

#[test]
fn checker_reports_broken_invariants() {
    let mut tree: IntervalTree<Span> = (1..=7).map(Span::point).collect();
    assert_eq!(tree.check_invariants(), Ok(()));
    let root = tree.inner.root.index();
    let root_span = Span::of(&tree.inner.nodes[root]);

    let cached = tree.inner.nodes[root].max_end;
    tree.inner.nodes[root].max_end = cached + 1;
    assert!(!tree.has_consistent_max_ends());
    assert_eq!(
        tree.check_invariants(),
        Err(Violation::MaxEnd {
            at: root_span,
            cached: cached + 1,
            actual: cached,
        })
    );
    tree.inner.nodes[root].max_end = cached;

    tree.inner.nodes[root].color = Color::Red;
    assert!(!tree.is_balanced());
    assert_eq!(tree.check_invariants(), Err(Violation::RedRoot));
    tree.inner.nodes[root].color = Color::Black;

    tree.inner.len += 1;
    assert_eq!(
        tree.check_invariants(),
        Err(Violation::Count {
            recorded: 8,
            reachable: 7,
        })
    );
    assert_eq!(
        Violation::RedRoot.to_string(),
        "root or sentinel is red"
    );
}

#[test]
#[should_panic(expected = "Reached maximum number of nodes")]
fn narrow_index_runs_out_of_nodes() {
    let mut tree: IntervalTree<Span, u8> = IntervalTree::with_capacity(0);
    for i in 0..300 {
        let _ignore = tree.insert(Span::point(i));
    }
}

#[test]
fn full_narrow_tree_still_accepts_known_keys() {
    let mut tree: IntervalTree<Span, u8> = IntervalTree::with_capacity(0);
    for i in 0..254 {
        assert!(tree.insert(Span::point(i)));
    }
    assert!(!tree.insert(Span::point(0)));
    assert!(!tree.insert(Span::point(253)));
    assert_eq!(tree.len(), 254);

    let mut set: IntervalSetTree<Tagged, u8> = IntervalSetTree::with_capacity(0);
    for i in 0..254 {
        assert!(set.insert(tagged(i, i + 1, 0)));
    }
    assert!(set.insert(tagged(7, 8, 1)));
    assert_eq!(set.len(), 255);
    assert_eq!(set.check_invariants(), Ok(()));
}

#[test]
fn clear_resets_the_tree() {
    let mut tree: IntervalTree<Span, u16> = IntervalTree::with_capacity(16);
    tree.extend((0..16).map(Span::point));
    tree.clear();
    assert!(tree.is_empty());
    assert_eq!(tree.check_invariants(), Ok(()));
    assert!(tree.insert(Span::point(3)));
    assert_eq!(tree.minimum(), Some(&Span::point(3)));
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct Tagged {
    span: Span,
    tag: u32,
}

impl Interval for Tagged {
    fn start(&self) -> i64 {
        self.span.start
    }

    fn end(&self) -> i64 {
        self.span.end
    }
}

fn tagged(start: i64, end: i64, tag: u32) -> Tagged {
    Tagged {
        span: Span::new(start, end),
        tag,
    }
}

#[test]
fn set_tree_groups_values_with_equal_bounds() {
    let seeded = IntervalSetTree::with_interval(tagged(0, 5, 1));
    assert_eq!(seeded.len(), 1);
    assert!(seeded.contains(&tagged(0, 5, 1)));

    let mut tree = IntervalSetTree::new();
    assert!(tree.insert(tagged(0, 5, 1)));
    assert!(tree.insert(tagged(0, 5, 2)));
    assert!(!tree.insert(tagged(0, 5, 1)));
    assert!(tree.insert(tagged(3, 8, 1)));
    assert_eq!(tree.len(), 3);
    assert_eq!(tree.inner.nodes.len(), 3);

    assert!(tree.contains(&tagged(0, 5, 2)));
    assert!(!tree.contains(&tagged(0, 5, 3)));
    assert_eq!(tree.search(&(0..5i64)).map(|m| m.len()), Some(2));
    assert_eq!(tree.minimum().map(|m| m.len()), Some(2));
    assert_eq!(tree.successor(&(0..5i64)).map(|m| m.len()), Some(1));
    assert!(tree.predecessor(&(0..5i64)).is_none());
    assert_eq!(tree.num_overlappers(&(4..6i64)), 3);
    assert_eq!(tree.minimum_overlapper(&(6..9i64)), tree.maximum());
    assert_eq!(
        tree.overlappers(&(6..9i64)).collect::<Vec<_>>(),
        [&tagged(3, 8, 1)]
    );
    assert_eq!(tree.iter().count(), 3);

    assert!(tree.delete(&tagged(0, 5, 1)));
    assert!(!tree.delete(&tagged(0, 5, 1)));
    assert_eq!(tree.len(), 2);
    assert!(tree.search(&(0..5i64)).is_some());
    assert!(tree.delete(&tagged(0, 5, 2)));
    assert!(tree.search(&(0..5i64)).is_none());
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.check_invariants(), Ok(()));
}

#[test]
fn set_tree_bulk_deletes_count_members() {
    let mut tree: IntervalSetTree<Tagged> = (0..4)
        .flat_map(|tag| [tagged(0, 2, tag), tagged(5, 9, tag), tagged(10, 12, tag)])
        .collect();
    assert_eq!(tree.len(), 12);

    assert!(tree.delete_same_bounds(&(5..9i64)));
    assert!(!tree.delete_same_bounds(&(5..9i64)));
    assert_eq!(tree.len(), 8);

    assert!(tree.delete_min());
    assert_eq!(tree.len(), 4);
    assert_eq!(tree.minimum(), tree.maximum());

    assert!(tree.delete_overlappers(&(11..20i64)));
    assert!(tree.is_empty());
    assert!(!tree.delete_max());
    assert_eq!(tree.check_invariants(), Ok(()));
}

#[test]
fn set_tree_matches_linear_scan() {
    let seeds = vec![[0; 32], [1; 32], [2; 32]];
    for seed in seeds {
        let mut gen = IntervalGenerator::with_limit(seed, 200);
        let mut tree = IntervalSetTree::new();
        let mut values = HashSet::new();
        for _ in 0..1000 {
            let value = Tagged {
                span: gen.next_with_range(20),
                tag: gen.rng.gen_range(0..3),
            };
            assert_eq!(tree.insert(value.clone()), values.insert(value));
            assert_eq!(tree.len(), values.len());
        }
        assert_eq!(tree.check_invariants(), Ok(()));
        assert_eq!(tree.iter().count(), values.len());
        assert!(tree
            .iter()
            .collect::<Vec<_>>()
            .windows(2)
            .all(|w| w[0].cmp_bounds(w[1]).is_le()));

        for _ in 0..100 {
            let query = gen.next_with_range(30);
            let expected = values.iter().filter(|v| v.overlaps(&query)).count();
            assert_eq!(tree.num_overlappers(&query), expected);
            assert_eq!(tree.overlappers(&query).count(), expected);
            assert_eq!(tree.overlaps(&query), expected > 0);
        }

        let doomed: Vec<Tagged> = values.iter().take(values.len() / 2).cloned().collect();
        for value in &doomed {
            assert!(tree.delete(value));
            assert!(!tree.contains(value));
            values.remove(value);
            assert_eq!(tree.len(), values.len());
            assert_eq!(tree.check_invariants(), Ok(()));
        }
        let mut owned: Vec<Tagged> = tree.into_iter().collect();
        let mut rest: Vec<Tagged> = values.into_iter().collect();
        owned.sort_by(|a, b| a.cmp_bounds(b).then(a.tag.cmp(&b.tag)));
        rest.sort_by(|a, b| a.cmp_bounds(b).then(a.tag.cmp(&b.tag)));
        assert_eq!(owned, rest);
    }
}

#[cfg(feature = "graphviz")]
#[test]
fn interval_tree_draw_is_ok() {
    let mut tree = IntervalTree::new();
    let _ignore = tree.insert(Span::new(16, 21));
    let _ignore = tree.insert(Span::new(8, 9));
    let _ignore = tree.insert(Span::new(0, 23));
    let _ignore = tree.insert(Span::new(5, 6));
    let _ignore = tree.insert(Span::new(6, 99));

    let path = std::env::temp_dir().join("rb_interval_tree_draw.dot");
    tree.draw(&path).unwrap();
    let dot = std::fs::read_to_string(&path).unwrap();
    assert!(dot.contains("max 99"));
    assert!(dot.contains("Span"));

    tree.draw_without_payload(&path).unwrap();
    let dot = std::fs::read_to_string(&path).unwrap();
    assert!(!dot.contains("Span"));

    let set = IntervalSetTree::with_interval(tagged(1, 2, 7));
    set.draw(&path).unwrap();
    let _ignore = std::fs::remove_file(&path);
}

#[cfg(feature = "serde")]
#[test]
fn test_serde_interval_tree() {
    let mut gen = IntervalGenerator::new([9; 32]);
    let tree: IntervalTree<Span> = std::iter::repeat_with(|| gen.next_unique())
        .take(100)
        .collect();
    let json = serde_json::to_string(&tree).unwrap();
    let back: IntervalTree<Span> = serde_json::from_str(&json).unwrap();
    assert_eq!(back.len(), tree.len());
    assert_eq!(back.iter().collect::<Vec<_>>(), tree.iter().collect::<Vec<_>>());
    assert_eq!(back.check_invariants(), Ok(()));

    let span: Span = serde_json::from_value(serde_json::json!({"start": 1, "end": 4})).unwrap();
    assert_eq!(span, Span::new(1, 4));

    let set: IntervalSetTree<Tagged> = [tagged(0, 3, 1), tagged(0, 3, 2), tagged(2, 6, 1)]
        .into_iter()
        .collect();
    let json = serde_json::to_string(&set).unwrap();
    let back: IntervalSetTree<Tagged> = serde_json::from_str(&json).unwrap();
    assert_eq!(back.len(), 3);
    assert!(back.contains(&tagged(0, 3, 2)));
    assert_eq!(back.check_invariants(), Ok(()));
}
