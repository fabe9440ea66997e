//! Derives the visible todos of a small todo list, recomputing only when the
//! list or the filter actually changes.

use std::rc::Rc;

use reselect::{Selector, selector};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Filter {
    All,
    Open,
    Done,
}

#[derive(Debug, Clone)]
struct Todo {
    title: &'static str,
    done: bool,
}

#[derive(Clone)]
struct State {
    todos: Rc<Vec<Todo>>,
    filter: Filter,
}

impl State {
    fn toggle(&self, index: usize) -> Self {
        let mut todos = (*self.todos).clone();
        todos[index].done = !todos[index].done;
        Self { todos: Rc::new(todos), filter: self.filter }
    }
}

impl reselect::Compare for Filter {
    fn identical(&self, other: &Self) -> bool {
        self == other
    }
}

fn main() {
    let todos = |state: &State, _: &(), _: &()| Rc::clone(&state.todos);
    let filter = |state: &State, _: &(), _: &()| state.filter;

    let visible = selector!(todos, filter, |todos: &Rc<Vec<Todo>>, filter: &Filter| {
        println!("  (filtering {} todos)", todos.len());
        let titles: Vec<_> = todos
            .iter()
            .filter(|todo| match filter {
                Filter::All => true,
                Filter::Open => !todo.done,
                Filter::Done => todo.done,
            })
            .map(|todo| todo.title)
            .collect();
        Rc::new(titles)
    });

    let remaining = selector!(visible.clone(), |titles: &Rc<Vec<&'static str>>| {
        println!("  (counting)");
        titles.len()
    });

    let mut state = State {
        todos: Rc::new(vec![
            Todo { title: "write the parser", done: true },
            Todo { title: "test the parser", done: false },
            Todo { title: "ship it", done: false },
        ]),
        filter: Filter::Open,
    };

    println!("open: {:?}", visible.select(&state, &(), &()));
    println!("remaining: {}", remaining.select(&state, &(), &()));

    println!("same state again");
    println!("remaining: {}", remaining.select(&state, &(), &()));

    println!("toggling the second todo");
    state = state.toggle(1);
    println!("open: {:?}", visible.select(&state, &(), &()));
    println!("remaining: {}", remaining.select(&state, &(), &()));

    println!("showing finished todos");
    state.filter = Filter::Done;
    println!("done: {:?}", visible.select(&state, &(), &()));

    println!("showing everything");
    state.filter = Filter::All;
    println!("all: {:?}", visible.select(&state, &(), &()));
}
