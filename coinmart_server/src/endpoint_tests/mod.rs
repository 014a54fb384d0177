mod helpers;
mod mocks;

mod catalog;
mod orders;
