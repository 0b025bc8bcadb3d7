mod announce;
mod blog;
mod clock;
mod commands;
mod config;
mod contact;
mod dom;
mod error;
mod filter;
mod forms;
mod highlight;
mod history;
mod konami;
mod lazy_image;
mod nav;
mod pages;
mod posts;
mod projects;
mod rain;
mod routes;
mod share;
mod storage;
mod terminal;
mod theme;
mod transcript;

fn main() {
    dioxus::launch(routes::App);
}
