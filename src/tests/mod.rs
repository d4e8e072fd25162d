mod support;

mod visibility;
