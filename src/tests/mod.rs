mod fixtures;
mod helpers;
