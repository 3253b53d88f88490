use forward_list::{ForwardList, Position};
use proptest::{prelude::*, sample::Index};

#[derive(Debug, Clone)]
enum Op {
    PushFront(i32),
    PopFront,
    InsertAfter(Index, i32),
    EraseAfter(Index),
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<i32>().prop_map(Op::PushFront),
        2 => Just(Op::PopFront),
        4 => (any::<Index>(), any::<i32>()).prop_map(|(at, v)| Op::InsertAfter(at, v)),
        3 => any::<Index>().prop_map(Op::EraseAfter),
        1 => Just(Op::Clear),
    ]
}

/// The position `steps` hops after the sentinel.
fn nth_after_sentinel<T>(list: &ForwardList<T>, steps: usize) -> Position {
    let mut pos = list.before_begin();
    for _ in 0..steps {
        pos = list.advance(pos);
    }
    pos
}

fn walk_len<T>(list: &ForwardList<T>) -> usize {
    let mut count = 0;
    let mut pos = list.begin();
    while !pos.is_end() {
        pos = list.advance(pos);
        count += 1;
    }
    count
}

fn apply(list: &mut ForwardList<i32>, model: &mut Vec<i32>, op: &Op) {
    match op {
        Op::PushFront(v) => {
            list.push_front(*v);
            model.insert(0, *v);
        }
        Op::PopFront => {
            let popped = list.pop_front();
            let expected = (!model.is_empty()).then(|| model.remove(0));
            assert_eq!(popped, expected);
        }
        Op::InsertAfter(at, v) => {
            let steps = at.index(model.len() + 1);
            let pos = nth_after_sentinel(list, steps);
            let inserted = list.insert_after(pos, *v);
            assert_eq!(*list.get(inserted), *v);
            model.insert(steps, *v);
        }
        Op::EraseAfter(at) => {
            let steps = at.index(model.len() + 1);
            let pos = nth_after_sentinel(list, steps);
            let next = list.erase_after(pos);
            if steps < model.len() {
                model.remove(steps);
                match model.get(steps) {
                    Some(v) => assert_eq!(list.get(next), v),
                    None => assert!(next.is_end()),
                }
            } else {
                assert!(next.is_end());
            }
        }
        Op::Clear => {
            list.clear();
            model.clear();
        }
    }
}

proptest! {
    #[test]
    fn behaves_like_a_vec(ops in prop::collection::vec(op(), 0..64)) {
        let mut list = ForwardList::new();
        let mut model = Vec::new();

        for op in &ops {
            apply(&mut list, &mut model, op);
            prop_assert_eq!(list.len(), model.len());
            prop_assert_eq!(walk_len(&list), model.len());
            prop_assert_eq!(list.is_empty(), model.is_empty());
        }

        prop_assert!(list.iter().eq(model.iter()));
    }

    #[test]
    fn collect_round_trips(input in prop::collection::vec(any::<u16>(), 0..128)) {
        let list: ForwardList<_> = input.iter().copied().collect();
        prop_assert_eq!(list.len(), input.len());
        prop_assert_eq!(list.into_iter().collect::<Vec<_>>(), input);
    }

    #[test]
    fn clone_survives_edits_to_original(
        input in prop::collection::vec(any::<i32>(), 0..32),
        ops in prop::collection::vec(op(), 0..32),
    ) {
        let mut list: ForwardList<_> = input.iter().copied().collect();
        let copy = list.clone();
        let mut model = input.clone();

        for op in &ops {
            apply(&mut list, &mut model, op);
        }

        prop_assert_eq!(copy.len(), input.len());
        prop_assert!(copy.iter().eq(input.iter()));
    }

    #[test]
    fn ordering_matches_vec(
        a in prop::collection::vec(0u8..4, 0..6),
        b in prop::collection::vec(0u8..4, 0..6),
    ) {
        let la = ForwardList::from(a.clone());
        let lb = ForwardList::from(b.clone());
        prop_assert_eq!(la == lb, a == b);
        prop_assert_eq!(la.cmp(&lb), a.cmp(&b));
        prop_assert_eq!(la < lb, a < b);
        prop_assert_eq!(la >= lb, a >= b);
    }
}
