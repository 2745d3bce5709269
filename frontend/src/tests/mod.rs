pub mod support;

mod flows;
