//! Some utility functions

use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::io::{stdin, stdout, Read, Write};

use crate::task::Task;

/// A debug utility that pretty-prints a task list
pub fn print_task_list(tasks: &[Task]) {
    for task in tasks {
        print_task(task);
    }
}

pub fn print_task(task: &Task) {
    let completion = if task.completed() { "✓" } else { " " };
    match task.time() {
        Some(time) => println!("    {} {} {}\t{}", completion, task.date(), time, task.text()),
        None =>       println!("    {} {}\t{}", completion, task.date(), task.text()),
    }
}

/// Compare keys of two hashmaps for equality
pub fn keys_are_the_same<T, U, V>(left: &HashMap<T, U>, right: &HashMap<T, V>) -> bool
where
    T: Hash + Eq + Clone + std::fmt::Display,
{
    if left.len() != right.len() {
        log::debug!("Count of keys mismatch: {} and {}", left.len(), right.len());
        return false;
    }

    let keys_l: HashSet<T> = left.keys().cloned().collect();
    let keys_r: HashSet<T> = right.keys().cloned().collect();
    let result = keys_l == keys_r;
    if result == false {
        log::debug!("Keys of a map mismatch");
        for key in keys_l {
            log::debug!("   left: {}", key);
        }
        log::debug!("RIGHT:");
        for key in keys_r {
            log::debug!("  right: {}", key);
        }
    }
    result
}

/// Wait for the user to press enter
pub fn pause() {
    let mut stdout = stdout();
    stdout.write_all(b"Press Enter to continue...").unwrap();
    stdout.flush().unwrap();
    stdin().read_exact(&mut [0]).unwrap();
}
