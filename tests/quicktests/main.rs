//! Model-based tests: random operations are applied to a `Tree` and to a `BTreeMap` and the two
//! must always agree.

use std::collections::{BTreeMap, HashSet};

use keyed_bst::{Numeric, Tree};
use quickcheck::quickcheck;

/// Applies inserts (`Ok`) and deletes (`Err`) to a tree and a map, checking every delete returns
/// the same thing from both.
fn do_ops(ops: &[Result<(i8, i8), i8>], tree: &mut Tree<i8, Numeric>, map: &mut BTreeMap<i8, i8>) {
    for op in ops {
        match op {
            Ok((k, v)) => {
                tree.insert(&k.to_string(), *v).unwrap();
                map.insert(*k, *v);
            }
            Err(k) => {
                assert_eq!(tree.delete(&k.to_string()), map.remove(k));
            }
        }
    }
}

quickcheck! {
    fn fuzz_multiple_operations_i8(ops: Vec<Result<(i8, i8), i8>>) -> bool {
        let mut tree = Tree::new(Numeric);
        let mut map = BTreeMap::new();

        do_ops(&ops, &mut tree, &mut map);

        let entries: Vec<_> = tree.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        let expected: Vec<_> = map.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        tree.len() == map.len() && entries == expected
    }

    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        let mut tree = Tree::new(Numeric);
        for x in &xs {
            tree.insert(&x.to_string(), *x).unwrap();
        }
        let added: HashSet<_> = xs.into_iter().collect();
        let nots: HashSet<_> = nots.into_iter().collect();
        let mut nots = nots.difference(&added);

        nots.all(|x| !tree.contains(&x.to_string()) && tree.search(&x.to_string()).is_none())
    }

    fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        let mut tree = Tree::new(Numeric);
        for x in &xs {
            tree.insert(&x.to_string(), *x).unwrap();
        }
        for delete in &deletes {
            tree.delete(&delete.to_string());
        }

        let mut still_present = xs;
        for delete in &deletes {
            // We may have inserted the same value multiple times - delete each one.
            while let Some(pos) = still_present.iter().position(|x| x == delete) {
                still_present.swap_remove(pos);
            }
        }
        let distinct: HashSet<_> = still_present.iter().collect();

        deletes.iter().all(|x| tree.search(&x.to_string()).is_none())
            && still_present.iter().all(|x| tree.search(&x.to_string()) == Some(x))
            && tree.len() == distinct.len()
    }

    fn destructor_sees_every_dropped_value_once(keys: Vec<u8>, deletes: Vec<u8>) -> bool {
        use std::cell::RefCell;
        use std::rc::Rc;

        let released = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&released);
        let mut tree = Tree::with_destructor(Numeric, move |v: usize| sink.borrow_mut().push(v));

        // Every value is unique so we can tell where each one ended up.
        for (i, k) in keys.iter().enumerate() {
            tree.insert(&k.to_string(), i).unwrap();
        }
        let mut returned = Vec::new();
        for k in &deletes {
            returned.extend(tree.delete(&k.to_string()));
        }
        tree.destroy();

        let mut seen: Vec<usize> = released.borrow().iter().chain(&returned).copied().collect();
        seen.sort_unstable();
        seen == (0..keys.len()).collect::<Vec<_>>()
    }
}
