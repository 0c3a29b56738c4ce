#![cfg(test)]

// Property tests for LinkedList and ListCursor against a VecDeque model.

use crate::linked_list::LinkedList;
use proptest::prelude::*;
use std::collections::VecDeque;

// Payloads carry a tag so sort stability is observable.
type Item = (u8, u16);

#[derive(Clone, Debug)]
enum Op {
    Push(Item),
    Append(Item),
    Pop,
    Slice,
    // Walk the cursor this many steps (mod len), then take through it.
    CursorTake(usize),
    Sort(bool),
}

fn arb_item() -> impl Strategy<Value = Item> {
    (0u8..6, any::<u16>())
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => arb_item().prop_map(Op::Push),
        3 => arb_item().prop_map(Op::Append),
        1 => Just(Op::Pop),
        1 => Just(Op::Slice),
        2 => any::<usize>().prop_map(Op::CursorTake),
        1 => any::<bool>().prop_map(Op::Sort),
    ]
}

// Property: the list behaves like a deque under push/append/pop/slice,
// cursor removal repositions to the successor (or the new tail, or
// nothing), and sorting by the first field is stable in both directions.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_list_matches_deque(ops in proptest::collection::vec(arb_op(), 1..80)) {
        let mut sut: LinkedList<Item> = LinkedList::new();
        let mut model: VecDeque<Item> = VecDeque::new();

        for op in ops {
            match op {
                Op::Push(x) => { sut.push(x); model.push_front(x); }
                Op::Append(x) => { sut.append(x); model.push_back(x); }
                Op::Pop => prop_assert_eq!(sut.pop(), model.pop_front()),
                Op::Slice => prop_assert_eq!(sut.slice(), model.pop_back()),
                Op::CursorTake(n) => {
                    if model.is_empty() {
                        prop_assert!(sut.cursor().take().is_none());
                    } else {
                        let i = n % model.len();
                        let mut c = sut.cursor();
                        for _ in 0..i {
                            prop_assert!(c.next());
                        }
                        prop_assert_eq!(c.take(), model.remove(i));
                        let expected = if i < model.len() {
                            model.get(i)
                        } else {
                            model.back()
                        };
                        prop_assert_eq!(c.get(), expected);
                    }
                }
                Op::Sort(ascending) => {
                    sut.sort_by(ascending, |a, b| a.0.cmp(&b.0));
                    let v = model.make_contiguous();
                    if ascending {
                        v.sort_by(|a, b| a.0.cmp(&b.0));
                    } else {
                        v.sort_by(|a, b| b.0.cmp(&a.0));
                    }
                }
            }

            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.front(), model.front());
            prop_assert_eq!(sut.back(), model.back());
            let forward: Vec<Item> = sut.iter().copied().collect();
            let expected: Vec<Item> = model.iter().copied().collect();
            prop_assert_eq!(&forward, &expected);
            let backward: Vec<Item> = sut.iter().rev().copied().collect();
            prop_assert!(backward.iter().eq(expected.iter().rev()));
        }
    }
}
