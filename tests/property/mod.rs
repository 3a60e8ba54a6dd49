mod planner_properties;
