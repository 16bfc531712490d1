//! Builds the walkthrough trees, prints them and their traversals, then exercises search,
//! misuse and deletion. Set `BST_LOG` (`error` to `trace`) to see the tree's own logging.

use std::env;
use std::error::Error;
use std::fmt::Debug;
use std::str::FromStr;

use log::{info, warn, LevelFilter};
use parent_bst::Tree;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

fn log_level() -> LevelFilter {
    env::var("BST_LOG")
        .ok()
        .and_then(|level| LevelFilter::from_str(&level).ok())
        .unwrap_or(LevelFilter::Info)
}

fn print_traversals<T: Clone + Debug>(tree: &Tree<T>) {
    let mut inorder = Vec::new();
    tree.traverse_inorder(tree.root(), |v| inorder.push(v.clone()));
    println!("inorder:   {:?}", inorder);

    let mut preorder = Vec::new();
    tree.traverse_preorder(tree.root(), |v| preorder.push(v.clone()));
    println!("preorder:  {:?}", preorder);

    let mut postorder = Vec::new();
    tree.traverse_postorder(tree.root(), |v| postorder.push(v.clone()));
    println!("postorder: {:?}", postorder);
}

fn main() -> Result<(), Box<dyn Error>> {
    TermLogger::init(
        log_level(),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let mut numbers = Tree::with_root(10);
    let root = numbers.root().ok_or("new tree has a root")?;
    for value in [20, 5, 21, 8, 16, 4] {
        numbers.insert_at(root, value)?;
    }
    println!("{}", numbers.render(Some(root)));
    print_traversals(&numbers);

    let five = numbers.search(root, &5);
    println!("search 5:  {}", numbers.render(five));
    println!("search 99: {}", numbers.render(numbers.search(root, &99)));

    if let Some(five) = five {
        if let Err(e) = numbers.insert_at(five, 6) {
            warn!("Inserting below 5: {}", e);
        }
        info!("5 sits at depth {:?}", numbers.depth(five));
    }

    info!("Deleting 20 which has two children");
    numbers.delete(&20);
    println!("{}", numbers.render(numbers.root()));
    print_traversals(&numbers);

    let mut words = Tree::with_root("Hello".to_string());
    let root = words.root().ok_or("new tree has a root")?;
    for word in ["World", "We", "Love", "Swift", "Programming", "Language"] {
        words.insert_at(root, word.to_string())?;
    }
    println!("{}", words.render(Some(root)));
    print_traversals(&words);
    info!("Height of the word tree is {:?}", words.height(root));

    Ok(())
}
