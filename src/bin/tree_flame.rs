use huffman_tree::{Selection, TreeBuilder};

fn main() {
    let weights = (0..4096u64).map(|i| (i * 7919) % 1000 + 1).collect::<Vec<_>>();

    for _ in 0..50 {
        for selection in [Selection::LinearScan, Selection::MinHeap] {
            let mut tree = TreeBuilder::with_selection(&weights, selection).unwrap();
            tree.build().unwrap();
        }
    }
}
