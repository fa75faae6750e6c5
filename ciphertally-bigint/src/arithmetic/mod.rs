mod add;
mod div;
mod mul;
mod sub;
