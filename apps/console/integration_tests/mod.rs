mod session_check;
