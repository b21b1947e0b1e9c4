mod controls;
mod panels;
mod users;
