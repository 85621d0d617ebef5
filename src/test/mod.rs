mod citizens;
mod city_model;
mod disasters;
mod simulation;
mod small_city;
