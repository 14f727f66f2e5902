#![no_main]
use huffman_tree::{Selection, TreeBuilder};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|weights: Vec<u32>| {
    let weights: Vec<u64> = weights.into_iter().map(u64::from).collect();

    let Ok(mut scan) = TreeBuilder::new(&weights) else {
        assert!(weights.is_empty());
        return;
    };
    let root = scan.build().unwrap();

    let n = weights.len();
    assert_eq!(scan.nodes().len(), 2 * n - 1);
    assert_eq!(root.index(), 2 * n - 2);
    assert_eq!(scan.nodes().iter().filter(|node| node.is_unattached()).count(), 1);

    for node in &scan.nodes()[n..] {
        let left = scan.node(node.left().unwrap()).unwrap();
        let right = scan.node(node.right().unwrap()).unwrap();
        assert_eq!(node.weight(), left.weight() + right.weight());
    }

    let mut heap = TreeBuilder::with_selection(&weights, Selection::MinHeap).unwrap();
    heap.build().unwrap();
    assert_eq!(scan.nodes(), heap.nodes());
});
